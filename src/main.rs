use anyhow::Result;
use medalscraper::{
    fetch,
    output::{write_payload, Payload},
    pipeline, Config, Document, IdentityTable,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configuration + reference data ───────────────────────────
    let cfg = Config::load()?;
    let table = match &cfg.identity_table {
        Some(path) => IdentityTable::from_json_file(path)?,
        None => IdentityTable::builtin(),
    };

    // ─── 3) acquire the document ─────────────────────────────────────
    let client = fetch::build_client()?;
    let body = fetch::load_source(&client, &cfg).await?;

    // ─── 4) extract ──────────────────────────────────────────────────
    let doc = Document::parse(cfg.source_mode, &body, &cfg.anchor);
    let standings = pipeline::run(&doc, &table, &cfg);
    info!(
        records = standings.records.len(),
        is_live = standings.is_live,
        "standings ready"
    );

    // ─── 5) write ────────────────────────────────────────────────────
    let payload = Payload::new(cfg.source_descriptor(), standings);
    write_payload(&cfg.output, &payload)?;

    info!("all done");
    Ok(())
}
