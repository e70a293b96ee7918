pub mod output;

pub use output::{write_items_csv, write_simulation_csv, write_simulation_json};
