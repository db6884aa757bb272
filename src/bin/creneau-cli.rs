#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand, ValueEnum};
use creneau::{
    io,
    model::{Shift, ShiftId},
    service::{
        ErrorKind, MissingIdPolicy, NewShift, ServiceOptions, ShiftError, ShiftPatch, ShiftQuery,
        ShiftService, UpdateCheck,
    },
    storage::JsonStorage,
    time,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de gestion des créneaux de travail (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des créneaux
    #[arg(long, global = true, env = "CRENEAU_DATA", default_value = "shifts.json")]
    data: String,

    /// Contrôle de chevauchement appliqué aux modifications
    #[arg(long, global = true, value_enum, default_value_t = CheckArg::Full)]
    update_check: CheckArg,

    /// Supprimer un identifiant inconnu est une erreur
    #[arg(long, global = true)]
    strict_delete: bool,

    /// Accepte `end <= start`
    #[arg(long, global = true)]
    allow_inverted: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CheckArg {
    Full,
    StartOrEnd,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les créneaux, filtrés par fenêtre
    List {
        #[arg(long, value_parser = time::parse_instant)]
        start: Option<DateTime<FixedOffset>>,
        #[arg(long, value_parser = time::parse_instant)]
        end: Option<DateTime<FixedOffset>>,
        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Afficher un créneau
    Get {
        #[arg(long)]
        id: String,
    },

    /// Créer un créneau
    Add {
        #[arg(long)]
        employee: String,
        /// RFC3339 (converti en UTC)
        #[arg(long, value_parser = time::parse_instant)]
        start: DateTime<FixedOffset>,
        /// RFC3339 (converti en UTC)
        #[arg(long, value_parser = time::parse_instant)]
        end: DateTime<FixedOffset>,
    },

    /// Modifier le début et/ou la fin d'un créneau
    Update {
        #[arg(long)]
        id: String,
        #[arg(long, value_parser = time::parse_instant)]
        start: Option<DateTime<FixedOffset>>,
        #[arg(long, value_parser = time::parse_instant)]
        end: Option<DateTime<FixedOffset>>,
    },

    /// Supprimer un créneau
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Importer des créneaux depuis un CSV `employee,start,end`
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Exporter (CSV et/ou JSON), filtré par fenêtre
    Export {
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long, value_parser = time::parse_instant)]
        start: Option<DateTime<FixedOffset>>,
        #[arg(long, value_parser = time::parse_instant)]
        end: Option<DateTime<FixedOffset>>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            err.downcast_ref::<ShiftError>().map_or(1, exit_code)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let opts = ServiceOptions {
        update_check: match cli.update_check {
            CheckArg::Full => UpdateCheck::FullInterval,
            CheckArg::StartOrEnd => UpdateCheck::StartOrEnd,
        },
        missing_id_on_delete: if cli.strict_delete {
            MissingIdPolicy::NotFound
        } else {
            MissingIdPolicy::Ignore
        },
        reject_inverted_ranges: !cli.allow_inverted,
    };
    let service = ShiftService::with_options(JsonStorage::open(&cli.data), opts);

    match cli.cmd {
        Commands::List { start, end, json } => {
            let shifts = service.list_shifts(&ShiftQuery::new(start, end))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&shifts)?);
            } else {
                shifts.iter().for_each(print_shift);
            }
        }
        Commands::Get { id } => {
            let shift = service.get_shift(&ShiftId::new(id))?;
            print_shift(&shift);
        }
        Commands::Add { employee, start, end } => {
            let shift = service.add_shift(NewShift::new(employee, start, end))?;
            print_shift(&shift);
        }
        Commands::Update { id, start, end } => {
            let shift = service.update_shift(&ShiftId::new(id), ShiftPatch { start, end })?;
            print_shift(&shift);
        }
        Commands::Delete { id } => {
            service.delete_shift(&ShiftId::new(id))?;
        }
        Commands::Import { csv } => {
            let requests = io::import_shifts_csv(&csv)?;
            let added = service.import_shifts(requests)?;
            println!("{} shift(s) imported from {csv}", added.len());
        }
        Commands::Export { out_csv, out_json, start, end } => {
            let shifts = service.list_shifts(&ShiftQuery::new(start, end))?;
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, &shifts)?;
            }
            if let Some(path) = out_json {
                io::export_shifts_json(path, &shifts)?;
            }
        }
    }

    Ok(())
}

fn print_shift(s: &Shift) {
    println!(
        "{} | {} | {} → {}",
        s.id,
        s.employee,
        time::format_utc(s.start),
        time::format_utc(s.end)
    );
}

fn exit_code(err: &ShiftError) -> i32 {
    match err.kind() {
        ErrorKind::Validation => 2,
        ErrorKind::Conflict => 3,
        ErrorKind::NotFound => 4,
        ErrorKind::Storage => 5,
    }
}
