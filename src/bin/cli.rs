//! RowKV CLI
//!
//! Local administration tool that operates on the database file directly.
//! Records are printed as JSON, one per line.

use clap::{Parser, Subcommand};
use rowkv::{Config, ListParams, RecordStore, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// RowKV CLI
#[derive(Parser, Debug)]
#[command(name = "rowkv-cli")]
#[command(about = "CLI for the RowKV record store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: String,

    /// Database file name inside the data directory
    #[arg(long, default_value = "kvstore.db")]
    db_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List records (search, sort, paginate)
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 50)]
        page_size: i64,

        /// Substring to match in key or value
        #[arg(long, default_value = "")]
        search: String,

        /// key, value, created_at or updated_at
        #[arg(long, default_value = "updated_at")]
        sort: String,

        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: String,
    },

    /// Get a record by id
    Get {
        id: i64,
    },

    /// Create a record
    Put {
        key: String,
        value: String,
    },

    /// Replace key and value of a record
    Update {
        id: i64,
        key: String,
        value: String,
    },

    /// Delete a record by id
    Del {
        id: i64,
    },

    /// Insert random records in one transaction
    Generate {
        #[arg(default_value_t = 1000)]
        count: usize,
    },

    /// Remove every record and reclaim disk space
    Truncate,

    /// Print the number of records
    Count,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .db_filename(&args.db_file)
        .pool_size(1)
        .build();
    let store = RecordStore::open(&config)?;

    match args.command {
        Commands::List {
            page,
            page_size,
            search,
            sort,
            order,
        } => {
            let params = ListParams::new()
                .page(page)
                .page_size(page_size)
                .search(search)
                .sort(sort)
                .order(order);
            for record in store.list(&params)? {
                print_json(&record);
            }
        }
        Commands::Get { id } => print_json(&store.get(id)?),
        Commands::Put { key, value } => print_json(&store.create(&key, &value)?),
        Commands::Update { id, key, value } => print_json(&store.update(id, &key, &value)?),
        Commands::Del { id } => {
            store.delete(id)?;
            println!("deleted {}", id);
        }
        Commands::Generate { count } => {
            let inserted = store.generate_bulk(count)?;
            println!("generated {} records", inserted);
        }
        Commands::Truncate => {
            store.truncate()?;
            println!("truncated");
        }
        Commands::Count => println!("{}", store.count()?),
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("error: failed to encode output: {}", e),
    }
}
