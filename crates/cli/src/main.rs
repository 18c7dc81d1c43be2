use std::process::ExitCode;

use tillbook_cli::{Settings, export_order};

fn main() -> ExitCode {
    tillbook_observability::init();

    let Some(order_path) = std::env::args().nth(1) else {
        eprintln!("usage: tillbook <order.json>");
        return ExitCode::from(2);
    };

    let settings = Settings::from_env();
    match export_order(&settings, order_path.as_ref()) {
        Ok(exported) => {
            println!("{}", exported.html.display());
            println!("{}", exported.pdf.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = format!("{err:#}"), "export failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
