use std::env;
use std::fs;
use std::io::BufWriter;

use log::info;

use recipe_harvest::{harvest_recipes, AppConfig, HarvestError};

fn main() -> Result<(), HarvestError> {
    env_logger::init();

    let mut config = AppConfig::load()?;

    // Positional overrides: input file, then output file
    let args: Vec<String> = env::args().collect();
    if let Some(input) = args.get(1) {
        config.input_file = input.clone();
    }
    if let Some(output) = args.get(2) {
        config.output_file = output.clone();
    }

    let identifiers: Vec<String> = fs::read_to_string(&config.input_file)?
        .lines()
        .map(str::to_string)
        .collect();
    info!(
        "harvesting {} identifiers from {}",
        identifiers.len(),
        config.input_file
    );

    let recipes = harvest_recipes(&identifiers, &config)?;
    info!("built {} records", recipes.len());

    let outfile = BufWriter::new(fs::File::create(&config.output_file)?);
    serde_json::to_writer_pretty(outfile, &recipes)?;

    Ok(())
}
