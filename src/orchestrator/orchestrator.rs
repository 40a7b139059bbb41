use std::error::Error;
use std::fs::File;

use csv::ReaderBuilder;
use log::{debug, warn};

use crate::engine::Bank;
use crate::transactions::OperationRecord;

/// Reads the operation CSV, drives the bank, and writes the accounts
/// summary to stdout. Rejected operations are logged and skipped; only
/// malformed input aborts the run.
pub fn run(filename: &str) -> Result<(), Box<dyn Error>> {
    let file = File::open(filename)?;
    let mut rdr: csv::Reader<File> = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut bank = Bank::new();
    for result in rdr.deserialize() {
        let record: OperationRecord = result?;
        debug!("processing {:?}", record);
        if let Err(err) = bank.process_operation(record) {
            warn!("operation rejected: {}", err);
        }
    }

    bank.output_accounts()?;
    Ok(())
}
