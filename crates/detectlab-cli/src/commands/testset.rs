use std::io::Write;
use std::path::Path;

use detectlab_core::{
    AbstractStore, ExperimentConfig, Result, Variant, sample, write_test_csv, write_test_text,
};

use super::create_output;

pub struct TestsCommandConfig<'a> {
    pub db: Option<&'a str>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    /// `text` or `csv`.
    pub format: &'a str,
    pub output_path: Option<&'a str>,
}

pub fn run(config: &ExperimentConfig, cmd: TestsCommandConfig<'_>) -> Result<()> {
    let db = cmd.db.map(Path::new).unwrap_or(&config.database);
    let count = cmd.count.unwrap_or(config.num_tests);
    let seed = cmd.seed.unwrap_or(config.seed);
    let csv = cmd.format == "csv";
    let default_output = if csv {
        &config.tests_csv_file
    } else {
        &config.tests_text_file
    };
    let output = cmd.output_path.map(Path::new).unwrap_or(default_output);

    let records = AbstractStore::open(db)?.all()?;
    let assignments = sample(records.len(), count, seed)?;

    // Build in memory first so a missing rewrite leaves no partial file behind.
    let mut buf = Vec::new();
    if csv {
        write_test_csv(&records, &assignments, &mut buf)?;
    } else {
        write_test_text(&records, &assignments, &mut buf)?;
    }
    let mut out = create_output(output)?;
    out.write_all(&buf)?;
    out.flush()?;

    let rewritten = assignments
        .iter()
        .filter(|a| a.variant == Variant::Rewritten)
        .count();

    println!("Test set (seed {seed})");
    println!("{}", "-".repeat(50));
    println!("  {:<6} {:<4} {}", "#", "var", "doi");
    for (i, a) in assignments.iter().enumerate() {
        println!("  {:<6} {:<4} {}", i + 1, a.variant.tag(), records[a.index].doi);
    }
    println!("{}", "-".repeat(50));
    println!(
        "  {} sampled from {}: {} original, {} rewritten",
        assignments.len(),
        records.len(),
        assignments.len() - rewritten,
        rewritten
    );
    println!("\n📄 Test set saved to: {}", output.display());
    Ok(())
}
