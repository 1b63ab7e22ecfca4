use std::{net::IpAddr, time::Duration};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_testing::emailjs::{self, EmailJsCredentials};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::EmailJs {
            host,
            port,
            service_id,
            template_id,
            public_key,
            private_key,
            delay_ms,
        } => {
            let credentials = EmailJsCredentials {
                service_id,
                template_id,
                public_key,
                private_key,
            };
            emailjs::start_server(host, port, credentials, Duration::from_millis(delay_ms))
                .await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the EmailJS testing server
    #[clap(name = "emailjs")]
    EmailJs {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        #[arg(long, default_value = "service_id")]
        service_id: String,
        #[arg(long, default_value = "template_id")]
        template_id: String,
        #[arg(long, default_value = "public_key")]
        public_key: String,
        /// Require this access token in addition to the public key
        #[arg(long)]
        private_key: Option<String>,
        /// Delay every response by this many milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
