pub mod data_channel;
pub mod network;
pub mod pasv;
pub mod port;

#[cfg(test)]
mod test_network;
