use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::fs;
use tracing_subscriber::EnvFilter;

use user_table::api_client::UsersApiClient;
use user_table::config::TableConfig;
use user_table::data::query::{SortKey, SortOrder};
use user_table::data::record::{Role, UserRecord};
use user_table::data::record_store::RecordStore;
use user_table::data::table_view::TablePage;
use user_table::loader::LoadSequencer;

fn print_help() {
    println!("user-table - render a page of the administrative users table");
    println!();
    println!("Usage: user-table [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --file <PATH>        Load users from a JSON file");
    println!("  --remote             Fetch users from the configured demo endpoint");
    println!("  --search <TERM>      Filter by name, email, or role");
    println!("  --sort <KEY[:DIR]>   Sort by a column key (asc or desc)");
    println!("  --page <N>           Zero-based page index");
    println!("  --page-size <N>      Rows per page");
    println!("  --help               Show this help");
}

struct Args {
    file: Option<String>,
    remote: bool,
    search: Option<String>,
    sort: Option<(SortKey, SortOrder)>,
    page: Option<usize>,
    page_size: Option<usize>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        file: None,
        remote: false,
        search: None,
        sort: None,
        page: None,
        page_size: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--remote" => args.remote = true,
            "--file" => args.file = Some(iter.next().context("--file requires a path")?),
            "--search" => args.search = Some(iter.next().context("--search requires a term")?),
            "--sort" => {
                let spec = iter.next().context("--sort requires a key")?;
                args.sort = Some(parse_sort(&spec)?);
            }
            "--page" => {
                let value = iter.next().context("--page requires a number")?;
                args.page = Some(value.parse().context("--page must be a number")?);
            }
            "--page-size" => {
                let value = iter.next().context("--page-size requires a number")?;
                args.page_size = Some(value.parse().context("--page-size must be a number")?);
            }
            other => bail!("unknown argument: {} (try --help)", other),
        }
    }
    Ok(Some(args))
}

fn parse_sort(spec: &str) -> Result<(SortKey, SortOrder)> {
    let (key, dir) = match spec.split_once(':') {
        Some((key, dir)) => (key, dir),
        None => (spec, "asc"),
    };

    let key = match key {
        "id" => SortKey::Id,
        "name" => SortKey::Name,
        "email" => SortKey::Email,
        "role" => SortKey::Role,
        "birth_date" => SortKey::BirthDate,
        other => bail!("unknown sort key: {}", other),
    };
    let order = match dir {
        "asc" => SortOrder::Ascending,
        "desc" => SortOrder::Descending,
        other => bail!("unknown sort direction: {}", other),
    };
    Ok((key, order))
}

/// Seed records used when neither --file nor --remote is given
fn sample_users() -> Vec<UserRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    vec![
        UserRecord {
            id: 1,
            name: "An Nguyen".to_string(),
            email: "an@example.com".to_string(),
            role: Role::Admin,
            birth_date: date(1988, 3, 14),
        },
        UserRecord {
            id: 2,
            name: "Binh Tran".to_string(),
            email: "binh@example.com".to_string(),
            role: Role::User,
            birth_date: date(1992, 7, 2),
        },
        UserRecord {
            id: 3,
            name: "Cuong Le".to_string(),
            email: "cuong@example.com".to_string(),
            role: Role::User,
            birth_date: date(1979, 11, 23),
        },
        UserRecord {
            id: 4,
            name: "Dung Pham".to_string(),
            email: "dung@example.com".to_string(),
            role: Role::User,
            birth_date: date(1995, 1, 30),
        },
        UserRecord {
            id: 5,
            name: "Tuan Vo".to_string(),
            email: "tuan@example.com".to_string(),
            role: Role::Admin,
            birth_date: date(1985, 6, 9),
        },
        UserRecord {
            id: 6,
            name: "Hoa Dang".to_string(),
            email: "hoa@example.com".to_string(),
            role: Role::Guest,
            birth_date: date(2001, 9, 17),
        },
    ]
}

fn render_page(page: &TablePage) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["ID", "Name", "Email", "Role", "Birth date"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for record in &page.rows {
        table.add_row(vec![
            record.id.to_string(),
            record.name.clone(),
            record.email.clone(),
            record.role.to_string(),
            record
                .birth_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ]);
    }

    println!("{table}");
    if page.filtered_count == 0 {
        println!("\nNo matching users.");
    } else {
        println!(
            "\nShowing {} of {} users (page {} of {})",
            page.rows.len(),
            page.filtered_count,
            page.page + 1,
            page.page_count,
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        print_help();
        return Ok(());
    };

    let config = TableConfig::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not load config, using defaults");
        TableConfig::default()
    });

    let mut store = RecordStore::new()
        .with_sortable(config.table.sortable_columns.clone())
        .with_page_size(config.table.default_page_size);

    let mut sequencer = LoadSequencer::new();
    let ticket = sequencer.begin();

    let records = if let Some(path) = &args.file {
        let contents = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        serde_json::from_str::<Vec<UserRecord>>(&contents)
            .with_context(|| format!("parsing {}", path))?
    } else if args.remote {
        let client = UsersApiClient::new(&config.api.base_url);
        match client.fetch_users() {
            Ok(records) => records,
            Err(err) => {
                sequencer.fail(ticket, &err);
                bail!("failed to fetch users: {}", err);
            }
        }
    } else {
        sample_users()
    };
    sequencer.complete(ticket, &mut store, records);

    if let Some(term) = &args.search {
        store.set_search(term.clone());
    }
    if let Some((key, order)) = args.sort {
        store.set_sort(key, order);
    }
    if let Some(page_size) = args.page_size {
        store.set_page_size(page_size);
    }
    if let Some(page) = args.page {
        store.set_page(page);
    }

    render_page(&store.page());
    Ok(())
}
