pub mod collect;
pub mod verify;

use std::path::PathBuf;

use chrono::{Datelike, Local};
pub use collect::collect;
pub use verify::verify;

pub fn make_csv_file_name(hour: u32) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "stormglass-{:02}h-{}-{:02}-{:02}.csv",
        hour,
        today.year(),
        today.month(),
        today.day()
    );

    dirs::home_dir().unwrap().join(file_name)
}
