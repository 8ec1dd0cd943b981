use anyhow::Result;
use auxkit_lib::types::PageRequest;
use auxkit_lib::{validation, CachedClient, Config, PageQuery, Query, SortDirection};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

use crate::output::{print_items, OutputFormat};

#[derive(Args)]
pub struct PagesArgs {
    /// Collection path relative to the base URL (e.g. /api/items)
    pub path: String,

    /// API base URL (overrides base_url / AUXKIT_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Items per page (max 1000)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Page offset to start from
    #[arg(long, default_value = "0")]
    pub offset: u64,

    /// Query parameter names: long (offset/pageSize) or short (o/s)
    #[arg(long)]
    pub style: Option<String>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Stop after this many fetches
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// Skip the response cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Folds command-line overrides into a copy of the loaded config.
pub fn effective_config(args: &PagesArgs, config: &Config) -> Result<Config> {
    let mut config = config.clone();
    if let Some(ref base_url) = args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(page_size) = args.page_size {
        config.page_size = validation::validate_page_size(page_size)?;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = Some(validation::validate_max_pages(max_pages)?);
    }
    if let Some(ref style) = args.style {
        config.param_style = validation::validate_param_style(style)?;
    }
    if args.no_cache {
        config.cache_ttl_secs = 0;
    }
    config.validate()?;
    Ok(config)
}

pub fn build_query(args: &PagesArgs, config: &Config) -> Result<PageQuery> {
    let mut query = PageQuery::default()
        .with_page_request(PageRequest::new(args.offset, config.page_size))
        .with_param_style(config.param_style);

    let filters = args
        .params
        .iter()
        .map(|raw| validation::validate_filter(raw))
        .collect::<Result<Vec<_>, _>>()?;
    query = query.with_filters(&filters);

    if let Some(ref sort_by) = args.sort_by {
        let sort_by = validation::sanitize_text(sort_by, validation::MAX_FILTER_LENGTH)?;
        query = query.with_sort_by(&sort_by);
    }

    if args.desc {
        query = query.with_sort_direction(SortDirection::Desc);
    }

    Ok(query)
}

pub async fn run(args: &PagesArgs, config: &Config, format: &OutputFormat) -> Result<()> {
    let path = validation::validate_path(&args.path)?;
    let config = effective_config(args, config)?;
    let query = build_query(args, &config)?;
    let client = CachedClient::from_config(&config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {spinner} {pos} pages {msg}",
    )?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("fetching {}", path));

    let items: Vec<Value> = client
        .page_loop()
        .run(
            |request| {
                let page_query = query.clone().with_page_request(request);
                let client = &client;
                let path = path.as_str();
                let pb = &pb;
                async move {
                    let page = client.get_page::<Value>(path, &page_query).await;
                    pb.inc(1);
                    page
                }
            },
            Some(query.page_request()),
        )
        .await?;

    pb.finish_and_clear();
    eprintln!("Fetched {} items from {} pages", items.len(), pb.position());

    print_items(&items, format)?;
    Ok(())
}
