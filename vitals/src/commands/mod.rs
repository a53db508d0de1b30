pub mod bmi;
pub mod connect;
pub mod init;
pub mod ping;
pub mod student;
pub mod user;

use vitals::StudentInput;

use crate::client::ApiClient;
use crate::config;
use crate::db;
use crate::home;
use crate::output::OutputFormat;
use crate::serve;
use crate::session::Session;

pub enum Command {
    Init {
        path: Option<String>,
    },
    Connect {
        connection: String,
    },
    Ping,
    Serve {
        addr: String,
        static_dir: Option<String>,
    },
    UserSet {
        name: String,
        age: i64,
        gender: String,
    },
    UserShow,
    UserClear,
    BmiPreview {
        height: f64,
        weight: f64,
    },
    BmiSave {
        height: f64,
        weight: f64,
    },
    BmiHistory {
        name: Option<String>,
    },
    BmiRecords,
    BmiShow {
        id: i64,
    },
    BmiLegend,
    StudentList,
    StudentShow {
        id: i64,
    },
    StudentAdd {
        input: StudentInput,
    },
    StudentUpdate {
        id: i64,
        changes: StudentInput,
    },
    StudentRemove {
        id: i64,
    },
}

/// Global flags shared by every command.
pub struct Options<'a> {
    pub profile: &'a str,
    pub db: Option<&'a str>,
    pub server: Option<&'a str>,
    pub format: &'a OutputFormat,
}

fn require_session(session: Option<Session>) -> Result<Session, String> {
    session.ok_or_else(|| "No current user. Run `vitals user set --name .. --age .. --gender ..` first".into())
}

pub fn run(command: Command, opts: &Options<'_>) -> Result<(), String> {
    let profile = config::load_config(opts.profile);
    let format = opts.format;
    let api = || ApiClient::new(&profile.server_url(opts.server));

    match command {
        Command::Init { path } => {
            let conn_str = db::connection_string(&profile, opts.db)?;
            let mut client = db::connect(&profile, opts.db)?;
            init::run(&mut client, path.as_deref(), &conn_str, format)
        }
        Command::Connect { connection } => connect::run(&connection, format),
        Command::Ping => {
            let mut client = db::connect(&profile, opts.db)?;
            ping::run(&mut client, format)
        }
        Command::Serve { addr, static_dir } => {
            let config = serve::config::Config {
                database_url: db::connection_string(&profile, opts.db)?,
                listen_addr: addr,
                static_dir,
            };
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| format!("Failed to start runtime: {e}"))?;
            runtime.block_on(serve::run(config))
        }
        Command::UserSet { name, age, gender } => {
            let home_dir = home::ensure_home_dir()?;
            user::set(&home_dir, &name, age, &gender, format)
        }
        Command::UserShow => {
            let session = home::load_session(&home::ensure_home_dir()?)?;
            user::show(session.as_ref(), format)
        }
        Command::UserClear => user::clear(&home::ensure_home_dir()?),
        Command::BmiPreview { height, weight } => {
            let session = home::load_session(&home::ensure_home_dir()?)?;
            bmi::preview(session.as_ref(), height, weight, format)
        }
        Command::BmiSave { height, weight } => {
            let session = require_session(home::load_session(&home::ensure_home_dir()?)?)?;
            bmi::save(&api()?, &session, height, weight, format)
        }
        Command::BmiHistory { name } => {
            let name = match name {
                Some(n) => n,
                None => require_session(home::load_session(&home::ensure_home_dir()?)?)?.name,
            };
            bmi::history(&api()?, &name, format)
        }
        Command::BmiRecords => bmi::records(&api()?, format),
        Command::BmiShow { id } => bmi::show(&api()?, id, format),
        Command::BmiLegend => bmi::legend(format),
        Command::StudentList => student::list(&api()?, format),
        Command::StudentShow { id } => student::show(&api()?, id, format),
        Command::StudentAdd { input } => student::add(&api()?, &input, format),
        Command::StudentUpdate { id, changes } => student::update(&api()?, id, changes, format),
        Command::StudentRemove { id } => student::remove(&api()?, id),
    }
}
