use clap::Parser;
use tower_lsp::{LspService, Server};

use vue_jumper_lsp::Backend;
use vue_jumper_lsp::logging::init_tracing;

/// Go-to-definition language server for Vue single-file components.
#[derive(Debug, Parser)]
#[command(name = "vue_jumper_lsp", version, about)]
struct Cli {
    /// Log filter (`tracing` EnvFilter syntax).  `RUST_LOG` wins when set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Communicate over stdio.  Accepted for client compatibility; stdio is
    /// the only transport.
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    if cli.stdio {
        tracing::debug!("--stdio given; stdio is the only transport");
    }

    let (service, socket) = LspService::new(Backend::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
