use anyhow::Result;

use crate::{
    cli::{create_spinner, VerifyArgs},
    coverage,
    range::TimeRange,
};

pub fn verify(args: &VerifyArgs) -> Result<()> {
    let range = TimeRange::new(args.start, args.end)?;

    let bar = create_spinner("Checking coverage...".to_string());
    let missing = coverage::missing_days(&args.file, &range)?;
    bar.finish_with_message("Coverage checked");

    if missing.is_empty() {
        println!("All {} days are covered", range.num_days());
    } else {
        println!("Missing {} of {} days:", missing.len(), range.num_days());
        for day in missing.iter().take(10) {
            println!("  {}", day);
        }
        if missing.len() > 10 {
            println!("  ... and {} more", missing.len() - 10);
        }
    }

    Ok(())
}
