//! Inspect command handler: previews filename extraction so malformed
//! report names can be diagnosed without running a reconciliation.

use anyhow::{Result, bail};
use colored::*;

use super::{collect_inputs, file_name_of};
use crate::cli::InspectArgs;
use crate::config::Config;
use crate::recon::batch::is_allowed_file;
use crate::recon::extract::extract_metadata;
use crate::recon::text::normalize;

pub fn handle_inspect_command(args: InspectArgs, config: &Config) -> Result<()> {
    if args.inputs.is_empty() && args.lookup.is_none() {
        bail!("Provide report files to inspect, or --lookup with a unit name");
    }

    let registry = config.registry();
    if registry.is_empty() {
        bail!("Configured unit registry is empty");
    }

    // Standalone lookups skip the exact-substring pass and use the
    // stricter cutoff
    if let Some(query) = &args.lookup {
        let resolved = registry.match_fuzzy(&normalize(query), config.standalone_cutoff);
        match resolved {
            Some(name) => println!("{} -> {}", query, name.green()),
            None => println!("{} -> {}", query, "sem correspondência".red()),
        }
    }

    for path in collect_inputs(&args.inputs)? {
        let name = file_name_of(&path);
        if !is_allowed_file(&name) {
            println!("{:<44} {}", name, "ignorado (extensão)".dimmed());
            continue;
        }

        let meta = extract_metadata(&name, &registry, config.resolve_cutoff);
        let unit = match meta.unit {
            Some(unit) => unit.green(),
            None => "-".red(),
        };
        let date = match meta.date {
            Some(date) => date.to_string().normal(),
            None => "-".red(),
        };
        println!("{:<44} {:<20} {}", name, unit, date);
    }

    Ok(())
}
