use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::utils::ControlWriter;
use crate::server::ServerContext;
use crate::session::Session;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

// Specific crates for PORT and PASV commands
use crate::core_network::pasv;
use crate::core_network::port;

use crate::core_ftpcommand::{
    cdup, cwd, dele, feat, list, mdtm, mkd, noop, pass, pwd, quit, retr, rmd, rnfr, rnto, size,
    stat, stor, syst, type_, user,
};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub type CommandHandler = Box<
    dyn Fn(
            ControlWriter,
            Arc<ServerContext>,
            Arc<Mutex<Session>>,
            String, // Payload, already left-trimmed
        ) -> HandlerFuture
        + Send
        + Sync,
>;

fn register<F, Fut>(
    handlers: &mut HashMap<FtpCommand, Arc<CommandHandler>>,
    command: FtpCommand,
    handler: F,
) where
    F: Fn(ControlWriter, Arc<ServerContext>, Arc<Mutex<Session>>, String) -> Fut
        + Send
        + Sync
        + 'static,
    Fut: Future<Output = Result<(), std::io::Error>> + Send + 'static,
{
    let boxed: CommandHandler = Box::new(
        move |writer: ControlWriter,
              ctx: Arc<ServerContext>,
              session: Arc<Mutex<Session>>,
              arg: String|
              -> HandlerFuture { Box::pin(handler(writer, ctx, session, arg)) },
    );
    handlers.insert(command, Arc::new(boxed));
}

pub fn initialize_command_handlers() -> HashMap<FtpCommand, Arc<CommandHandler>> {
    let mut handlers: HashMap<FtpCommand, Arc<CommandHandler>> = HashMap::new();

    register(&mut handlers, FtpCommand::USER, user::handle_user_command);
    register(&mut handlers, FtpCommand::PASS, pass::handle_pass_command);
    register(&mut handlers, FtpCommand::SYST, syst::handle_syst_command);
    register(&mut handlers, FtpCommand::NOOP, noop::handle_noop_command);
    register(&mut handlers, FtpCommand::ABOR, noop::handle_noop_command);
    register(&mut handlers, FtpCommand::TYPE, type_::handle_type_command);
    register(&mut handlers, FtpCommand::FEAT, feat::handle_feat_command);
    register(&mut handlers, FtpCommand::PWD, pwd::handle_pwd_command);
    register(&mut handlers, FtpCommand::CWD, cwd::handle_cwd_command);
    register(&mut handlers, FtpCommand::CDUP, cdup::handle_cdup_command);
    register(&mut handlers, FtpCommand::SIZE, size::handle_size_command);
    register(&mut handlers, FtpCommand::MDTM, mdtm::handle_mdtm_command);
    register(&mut handlers, FtpCommand::PASV, pasv::handle_pasv_command);
    register(&mut handlers, FtpCommand::PORT, port::handle_port_command);

    register(&mut handlers, FtpCommand::LIST, |writer, ctx, session, arg| {
        list::handle_list_command(writer, ctx, session, arg, true)
    });
    register(&mut handlers, FtpCommand::NLST, |writer, ctx, session, arg| {
        list::handle_list_command(writer, ctx, session, arg, false)
    });
    register(&mut handlers, FtpCommand::RETR, retr::handle_retr_command);
    register(&mut handlers, FtpCommand::STOR, |writer, ctx, session, arg| {
        stor::handle_stor_command(writer, ctx, session, arg, false)
    });
    register(&mut handlers, FtpCommand::APPE, |writer, ctx, session, arg| {
        stor::handle_stor_command(writer, ctx, session, arg, true)
    });

    register(&mut handlers, FtpCommand::DELE, dele::handle_dele_command);
    register(&mut handlers, FtpCommand::RMD, rmd::handle_rmd_command);
    register(&mut handlers, FtpCommand::MKD, mkd::handle_mkd_command);
    register(&mut handlers, FtpCommand::RNFR, rnfr::handle_rnfr_command);
    register(&mut handlers, FtpCommand::RNTO, rnto::handle_rnto_command);
    register(&mut handlers, FtpCommand::STAT, stat::handle_stat_command);
    register(&mut handlers, FtpCommand::QUIT, quit::handle_quit_command);

    handlers
}
