//! folio-studio - portfolio backend and command-line helpers

use std::io::Read;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use folio_studio::config::{Config, ConfigOptions};
use folio_studio::service::{submit_contact, ContactSubmission, ImageMode};
use folio_studio::{enhance_submission, lookup, AppError, AppServer, StudioClient};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(ValueEnum, Debug, Copy, Clone)]
enum ModeArg {
    Basic,
    Pro,
}

impl From<ModeArg> for ImageMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Basic => ImageMode::Basic,
            ModeArg::Pro => ImageMode::Pro,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "folio-studio")]
#[command(about = "Portfolio backend with message enhancement and design helpers")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct ServerArg {
    /// Base URL of a running folio-studio server
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Address to bind (overrides FOLIO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides FOLIO_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Image mode used when a request does not name one
        #[arg(long, value_enum)]
        image_mode: Option<ModeArg>,
    },

    /// Polish a contact message locally (reads stdin when TEXT is omitted)
    Enhance { text: Option<String> },

    /// Design ideas for a project category
    Ideas {
        category: String,

        /// Ask a server instead of using the local template table
        #[arg(long)]
        server: Option<String>,

        /// Use provider-generated ideas (requires --server)
        #[arg(long, requires = "server")]
        ai: bool,
    },

    /// Generate a design brief through a running server
    Brief {
        query: String,

        #[command(flatten)]
        target: ServerArg,
    },

    /// Generate a design image through a running server
    Image {
        prompt: String,

        /// Quality mode; the server default applies when omitted
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        #[command(flatten)]
        target: ServerArg,
    },

    /// Send a contact form submission to the form relay
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        message: String,

        /// Polish the message before sending
        #[arg(long)]
        enhance: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app_err) => {
                    app_err.log("cli");
                    eprintln!("{}", app_err.user_message());
                }
                None => error!("{:#}", e),
            }
            std::process::exit(1);
        }
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Serve {
            host,
            port,
            image_mode,
        } => {
            let overrides = ConfigOptions {
                host,
                port,
                default_image_mode: image_mode.map(ImageMode::from),
                ..Default::default()
            };
            let config = Config::new(ConfigOptions::from_env()?.merge(overrides))?;
            if config.api_key.is_none() {
                info!("GEMINI_API_KEY not set; AI endpoints will report a configuration error");
            }

            let server = AppServer::new(config)?;
            let addr = server.start().await?;
            info!("Listening on http://{} (Ctrl+C to stop)", addr);

            tokio::signal::ctrl_c().await?;
            info!("Shutting down");
        }

        Command::Enhance { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", enhance_submission(&text));
        }

        Command::Ideas {
            category,
            server,
            ai,
        } => {
            let ideas = match server {
                Some(url) => {
                    let client = StudioClient::new(&url)?;
                    if ai {
                        client.generate_ideas(&category).await?
                    } else {
                        client.idea_template(&category).await?
                    }
                }
                None => lookup(&category),
            };
            println!("{}", ideas);
        }

        Command::Brief { query, target } => {
            let brief = StudioClient::new(&target.server)?.generate_brief(&query).await?;
            println!("{}", brief);
        }

        Command::Image {
            prompt,
            mode,
            target,
        } => {
            let image = StudioClient::new(&target.server)?
                .generate_image(&prompt, mode.map(ImageMode::from))
                .await?;
            println!("{}", image.image_url);
        }

        Command::Contact {
            name,
            email,
            subject,
            message,
            enhance: polish,
        } => {
            let config = Config::new(ConfigOptions::from_env()?)?;
            let submission = ContactSubmission {
                name,
                email,
                subject,
                message: if polish {
                    enhance_submission(&message)
                } else {
                    message
                },
            };

            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.provider_timeout_secs))
                .build()
                .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;
            submit_contact(&client, &config.form_relay_url, &submission).await?;
            println!("Message sent");
        }
    }

    Ok(())
}
