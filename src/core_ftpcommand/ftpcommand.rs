#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    SYST,
    NOOP,
    ABOR,
    TYPE,
    FEAT,
    PWD,
    CWD,
    CDUP,
    SIZE,
    MDTM,
    PASV,
    PORT,
    LIST,
    NLST,
    RETR,
    STOR,
    APPE,
    DELE,
    RMD,
    MKD,
    RNFR,
    RNTO,
    STAT,
    QUIT,
}

impl FtpCommand {
    /// Looks up a verb, case-insensitively. A leading `X` is dropped so that
    /// `XPWD`, `XCWD`, `XMKD` and `XRMD` alias their plain counterparts.
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        let cmd = cmd.to_ascii_uppercase();
        let cmd = cmd.strip_prefix('X').unwrap_or(&cmd);
        match cmd {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "SYST" => Some(FtpCommand::SYST),
            "NOOP" => Some(FtpCommand::NOOP),
            "ABOR" => Some(FtpCommand::ABOR),
            "TYPE" => Some(FtpCommand::TYPE),
            "FEAT" => Some(FtpCommand::FEAT),
            "PWD" => Some(FtpCommand::PWD),
            "CWD" => Some(FtpCommand::CWD),
            "CDUP" => Some(FtpCommand::CDUP),
            "SIZE" => Some(FtpCommand::SIZE),
            "MDTM" => Some(FtpCommand::MDTM),
            "PASV" => Some(FtpCommand::PASV),
            "PORT" => Some(FtpCommand::PORT),
            "LIST" => Some(FtpCommand::LIST),
            "NLST" => Some(FtpCommand::NLST),
            "RETR" => Some(FtpCommand::RETR),
            "STOR" => Some(FtpCommand::STOR),
            "APPE" => Some(FtpCommand::APPE),
            "DELE" => Some(FtpCommand::DELE),
            "RMD" => Some(FtpCommand::RMD),
            "MKD" => Some(FtpCommand::MKD),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "STAT" => Some(FtpCommand::STAT),
            "QUIT" => Some(FtpCommand::QUIT),
            _ => None,
        }
    }
}

/// Splits a command line into its upper-cased verb and left-trimmed payload.
pub fn split_command(line: &str) -> (String, String) {
    let verb = line.split(' ').next().unwrap_or_default();
    let payload = line[verb.len()..].trim_start();
    (verb.to_ascii_uppercase(), payload.to_string())
}
