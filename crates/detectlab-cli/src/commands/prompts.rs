use std::path::Path;

use detectlab_core::{AbstractStore, ExperimentConfig, Result, write_prompts};

use super::create_output;

pub fn run(config: &ExperimentConfig, db: Option<&str>, output: Option<&str>) -> Result<()> {
    let db = db.map(Path::new).unwrap_or(&config.database);
    let output = output.map(Path::new).unwrap_or(&config.prompts_file);

    let store = AbstractStore::open(db)?;
    let records = store.all()?;
    let out = create_output(output)?;
    let written = write_prompts(&records, out)?;

    println!("Prompts");
    println!("{}", "-".repeat(50));
    println!("  {:<12} {}", "database", db.display());
    println!("  {:<12} {}", "abstracts", records.len());
    println!("  {:<12} {}", "written", written);
    println!("\n📄 Prompts saved to: {}", output.display());
    Ok(())
}
