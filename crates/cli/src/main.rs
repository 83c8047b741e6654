use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::pb::hello::{greeter_client::GreeterClient, HelloRequest};
use tutorial_core::{config, CoreConfig, TodoService};
use tutorial_stubgen::{clean, generate, ProtocCompiler, StubTarget};

#[derive(Parser)]
#[command(name = "tutorial")]
#[command(about = "gRPC tutorial tooling: stubs, todo database, hello client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate gRPC stubs from the proto files
    Generate {
        /// Which service's stubs to generate
        #[arg(value_enum)]
        target: TargetArg,
        /// Workspace root containing helloService/ and todoService/
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Remove previously generated gRPC stubs
    Clean {
        /// Which service's stubs to remove
        #[arg(value_enum)]
        target: TargetArg,
        /// Workspace root containing helloService/ and todoService/
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Create the local todo database, or bring its schema up to date
    InitDb {
        /// Database file (defaults to $TODO_DB_PATH, then todos.db)
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// List todos stored in the local database
    List {
        /// Database file (defaults to $TODO_DB_PATH, then todos.db)
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Call the Greeter service once, then consume its greeting stream
    Hello {
        /// Server address (defaults to $TUTORIAL_GRPC_URL, then http://localhost:50051)
        #[arg(long)]
        addr: Option<String>,
        #[arg(long, default_value = "Alice")]
        name: String,
        #[arg(long, default_value_t = 30)]
        age: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Hello,
    Todo,
    All,
}

impl TargetArg {
    fn targets(self) -> Vec<StubTarget> {
        match self {
            TargetArg::Hello => vec![StubTarget::hello()],
            TargetArg::Todo => vec![StubTarget::todo()],
            TargetArg::All => StubTarget::all(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorial=info".parse()?)
                .add_directive("tutorial_stubgen=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { target, root }) => {
            let compiler = ProtocCompiler::from_env();
            for target in target.targets() {
                match generate(&root, &target, &compiler) {
                    Ok(files) => {
                        for file in files {
                            println!("generated {}", file.display());
                        }
                    }
                    Err(e) => {
                        eprintln!("Error generating {} stubs: {}", target.name, e);
                        return Ok(exit_code(e.exit_code()));
                    }
                }
            }
        }
        Some(Commands::Clean { target, root }) => {
            for target in target.targets() {
                match clean(&root, &target) {
                    Ok(files) => {
                        for file in files {
                            println!("removed {}", file.display());
                        }
                    }
                    Err(e) => {
                        eprintln!("Error cleaning {} stubs: {}", target.name, e);
                        return Ok(exit_code(e.exit_code()));
                    }
                }
            }
        }
        Some(Commands::InitDb { db_path }) => {
            let cfg = resolve_config(db_path);
            TodoService::open(cfg.db_path())
                .with_context(|| format!("initialising {}", cfg.db_path().display()))?;
            println!("Initialised todo database at {}", cfg.db_path().display());
        }
        Some(Commands::List { db_path }) => {
            let cfg = resolve_config(db_path);
            ensure_exists(cfg.db_path())?;
            let todos = TodoService::open(cfg.db_path())?.list()?;
            if todos.is_empty() {
                println!("No todos found.");
            } else {
                for todo in todos {
                    println!("{}: {}", todo.id, todo.task);
                }
            }
        }
        Some(Commands::Hello { addr, name, age }) => {
            let addr = addr.unwrap_or_else(config::grpc_url_from_env);
            tokio::runtime::Runtime::new()?.block_on(run_hello(addr, name, age))?;
        }
        None => {
            println!("Use 'tutorial --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_config(db_path: Option<PathBuf>) -> CoreConfig {
    db_path.map(CoreConfig::new).unwrap_or_else(CoreConfig::from_env)
}

fn ensure_exists(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!(
            "todo database does not exist: {} (run `tutorial init-db` first)",
            path.display()
        );
    }
    Ok(())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

// Non-zero codes that fit in a byte pass through; anything else becomes 1.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

async fn run_hello(addr: String, name: String, age: i32) -> anyhow::Result<()> {
    let mut client = GreeterClient::connect(addr.clone())
        .await
        .with_context(|| format!("connecting to {addr}"))?;

    let reply = client
        .say_hello(HelloRequest {
            name: name.clone(),
            age,
        })
        .await?
        .into_inner();
    tracing::info!(
        "Unary response: {}, Timestamp: {}",
        reply.message,
        reply.timestamp
    );

    let mut stream = client
        .say_hello_stream(HelloRequest { name, age })
        .await?
        .into_inner();
    while let Some(reply) = stream.message().await? {
        tracing::info!(
            "Stream response: {}, Timestamp: {}",
            reply.message,
            reply.timestamp
        );
    }

    Ok(())
}
