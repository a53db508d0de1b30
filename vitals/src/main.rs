use clap::{Parser, Subcommand};

use vitals::StudentInput;
use vitals_cli::commands::{self, Command, Options};
use vitals_cli::output::OutputFormat;
use vitals_cli::serve::config::Config;

#[derive(Parser)]
#[command(name = "vitals", version, about = "BMI tracker and student records")]
struct Cli {
    /// Postgres connection string (overrides config)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Base URL of a running `vitals serve` (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Config profile to use
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Create the tables and a project config in .vitals/
    Init {
        /// Path to project root (defaults to current directory)
        path: Option<String>,
    },

    /// Save a global Postgres connection string
    Connect {
        /// Connection string (e.g. postgres://localhost/vitals)
        connection: String,
    },

    /// Test the database connection
    Ping,

    /// Run the HTTP API
    Serve {
        /// Listen address
        #[arg(long, default_value = Config::DEFAULT_LISTEN)]
        addr: String,

        /// Directory of static files served for unmatched paths
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Manage the current user BMI measurements are saved for
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Calculate BMI and browse history
    Bmi {
        #[command(subcommand)]
        action: BmiAction,
    },

    /// Student records
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Set the current user
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: i64,
        #[arg(long)]
        gender: String,
    },
    /// Show the current user
    Show,
    /// Forget the current user
    Clear,
}

#[derive(Subcommand)]
enum BmiAction {
    /// Calculate locally without saving
    Preview {
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },
    /// Calculate on the server and save to history
    Save {
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },
    /// History for a name (defaults to the current user)
    History {
        #[arg(long)]
        name: Option<String>,
    },
    /// All saved records, newest first
    Records,
    /// One saved record
    Show { id: i64 },
    /// Category ranges
    Legend,
}

#[derive(clap::Args)]
struct StudentArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    course: Option<String>,
    #[arg(long)]
    id_number: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    units: Option<f64>,
}

impl From<StudentArgs> for StudentInput {
    fn from(a: StudentArgs) -> Self {
        StudentInput {
            full_name: a.full_name,
            course: a.course,
            id_number: a.id_number,
            department: a.department,
            current_units: a.units,
        }
    }
}

#[derive(Subcommand)]
enum StudentAction {
    /// List all students
    List,
    /// Show one student
    Show { id: i64 },
    /// Add a student (all fields required)
    Add {
        #[command(flatten)]
        fields: StudentArgs,
    },
    /// Update a student (omitted fields are kept)
    Update {
        id: i64,
        #[command(flatten)]
        fields: StudentArgs,
    },
    /// Delete a student
    Remove { id: i64 },
}

fn into_command(command: CliCommand) -> Command {
    match command {
        CliCommand::Init { path } => Command::Init { path },
        CliCommand::Connect { connection } => Command::Connect { connection },
        CliCommand::Ping => Command::Ping,
        CliCommand::Serve { addr, static_dir } => Command::Serve { addr, static_dir },
        CliCommand::User { action } => match action {
            UserAction::Set { name, age, gender } => Command::UserSet { name, age, gender },
            UserAction::Show => Command::UserShow,
            UserAction::Clear => Command::UserClear,
        },
        CliCommand::Bmi { action } => match action {
            BmiAction::Preview { height, weight } => Command::BmiPreview { height, weight },
            BmiAction::Save { height, weight } => Command::BmiSave { height, weight },
            BmiAction::History { name } => Command::BmiHistory { name },
            BmiAction::Records => Command::BmiRecords,
            BmiAction::Show { id } => Command::BmiShow { id },
            BmiAction::Legend => Command::BmiLegend,
        },
        CliCommand::Student { action } => match action {
            StudentAction::List => Command::StudentList,
            StudentAction::Show { id } => Command::StudentShow { id },
            StudentAction::Add { fields } => Command::StudentAdd {
                input: fields.into(),
            },
            StudentAction::Update { id, fields } => Command::StudentUpdate {
                id,
                changes: fields.into(),
            },
            StudentAction::Remove { id } => Command::StudentRemove { id },
        },
    }
}

fn main() {
    let cli = Cli::parse();

    let opts = Options {
        profile: &cli.profile,
        db: cli.db.as_deref(),
        server: cli.server.as_deref(),
        format: &cli.format,
    };

    if let Err(e) = commands::run(into_command(cli.command), &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
