//! One-shot CSV export command
//!
//! Runs the export workflow headlessly: same omit-if-empty request
//! building, same failure classification, same file naming as the
//! dashboard's export dialog.

use crate::api::{ApiClient, MonitorApi};
use crate::export::{ExportFailure, export_file_name, filter_summary, today};
use crate::filters::FilterState;
use crate::{print_cmd_error, print_cmd_info, print_cmd_success, print_cmd_warn};
use std::error::Error;
use std::path::Path;

pub async fn run_export(
    api: &ApiClient,
    filters: FilterState,
    export_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    // Preview what the export covers. Keyword labels are best-effort;
    // ids stand in when the listing is unavailable.
    let keywords = match api.keywords().await {
        Ok(list) => list.items,
        Err(_) => Vec::new(),
    };
    print_cmd_info!("Export", "requesting CSV export");
    for line in filter_summary(&filters, &keywords) {
        println!("  {}", line);
    }

    match api.export_csv(&filters).await {
        Ok(bytes) => {
            let path = export_dir.join(export_file_name(today()));
            std::fs::write(&path, &bytes)?;
            print_cmd_success!(
                "Export complete",
                "{} bytes written to {}",
                bytes.len(),
                path.display()
            );
            Ok(())
        }
        Err(e) => {
            let failure = ExportFailure::classify(&e);
            match failure {
                ExportFailure::RateLimited { .. } => {
                    print_cmd_warn!("Rate limited", "{}", failure.message());
                }
                _ => {
                    print_cmd_error!("Export failed", failure.message().as_str());
                }
            }
            Err(Box::new(e))
        }
    }
}
