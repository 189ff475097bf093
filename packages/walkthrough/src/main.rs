use std::{error::Error, fs, path::PathBuf};

use agm::{
    belief::store::BeliefStore,
    config::{Config, ExpansionPolicy},
    explanation::Explanation,
};
use clap::{Parser, Subcommand};

mod scenarios;

/// Walks through AGM belief revision on small belief bases.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with engine settings. Missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// How expansion treats a formula contradicting the base. Overrides the
    /// config file.
    #[arg(long, global = true)]
    policy: Option<ExpansionPolicy>,

    /// Print the explanation tree of every operation.
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Entailment over {A, A=>B}.
    Entailment,
    /// Contraction and revision of {A (1), A=>B (0)}.
    Revision,
    /// Checks the AGM postulates for expanding a small base by a formula.
    Postulates { formula: String },
    /// Remainders and meets of {p, p=>q, q|p, p&q}.
    PartialMeet { target: String },
    /// Restores consistency of {A, ~A, B}.
    AutoFix,
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    Ok(match cli.policy {
        Some(policy) => config.with_expansion(policy),
        None => config,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    log::debug!("Running {:?} with {:?}", cli.command, config);

    let mut store = BeliefStore::with_config(config);
    let mut explanation = Explanation::new(format!("{:?}", cli.command));

    match &cli.command {
        Command::Entailment => scenarios::entailment(&mut store, &mut explanation)?,
        Command::Revision => scenarios::revision(&mut store, &mut explanation)?,
        Command::Postulates { formula } => {
            scenarios::postulates(&mut store, formula, &mut explanation)?
        }
        Command::PartialMeet { target } => {
            scenarios::partial_meet(&mut store, target, &mut explanation)?
        }
        Command::AutoFix => scenarios::auto_fix(&mut store, &mut explanation)?,
    }

    if cli.explain {
        println!("\n{explanation}");
    }

    Ok(())
}
