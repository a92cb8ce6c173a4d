//! CLI handlers for the `nodecfg config` subcommand.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Result, bail};
use nodecfg_config::{
    Config, HostFs, LoadOptions, MaterializedTls, Resolution, ResolvedConfig, ShowFormat, Tls,
    TrustSource, materialize,
};

fn parse_format(format: &str) -> ShowFormat {
    match format {
        "json" => ShowFormat::Json,
        _ => ShowFormat::Yaml,
    }
}

/// Show the effective configuration with source annotations.
pub(crate) fn show_config(options: &LoadOptions, format: &str, section: Option<&str>) -> Result<()> {
    let resolved = Config::load(options)?;
    let output = resolved
        .show(parse_format(format), section)
        .map_err(|e| anyhow::anyhow!("failed to format config: {e}"))?;
    println!("{output}");
    Ok(())
}

/// Show the file as it was loaded.
pub(crate) fn show_file(options: &LoadOptions, format: &str) -> Result<()> {
    let resolved = Config::load(options)?;
    println!("{}", render_file(&resolved, parse_format(format))?);
    Ok(())
}

fn render_file(resolved: &ResolvedConfig, format: ShowFormat) -> Result<String> {
    if resolved.pristine().is_none() {
        return Ok("No config file was loaded; the configuration is built from defaults only.".to_owned());
    }
    Ok(resolved.show_pristine(format)?)
}

/// Print the lock file path derived from the data directory.
pub(crate) fn show_lock_path(options: &LoadOptions) -> Result<()> {
    let resolved = Config::load(options)?;
    println!("{}", resolved.config.pid_file()?.display());
    Ok(())
}

/// Resolve the CLI's TLS settings for one API and load the credentials.
pub(crate) fn show_tls(options: &LoadOptions, api: &str) -> Result<()> {
    let resolved = Config::load(options)?;
    println!("{}", render_tls(&resolved.config, api)?);
    Ok(())
}

fn render_tls(config: &Config, api: &str) -> Result<String> {
    let (resolution, per_api_field) = match api {
        "kafka" => (config.rpk.kafka_tls(), "rpk.kafka_api.tls"),
        "admin" => (config.rpk.admin_tls(), "rpk.admin_api.tls"),
        other => bail!("unknown API '{other}' (expected kafka or admin)"),
    };

    let mut out = String::new();
    let source = match &resolution {
        Resolution::PerApi(_) => per_api_field,
        Resolution::Legacy(_) => "rpk.tls (deprecated)",
        Resolution::Unset => {
            let _ = write!(out, "No TLS configured for the {api} API.");
            return Ok(out);
        },
    };
    let _ = writeln!(out, "{api} API TLS from {source}");

    let descriptor: Option<&Tls> = resolution.value();
    if let Some(tls) = materialize(descriptor, &HostFs)? {
        describe(&mut out, &tls);
    }
    Ok(out)
}

fn describe(out: &mut String, tls: &MaterializedTls) {
    match &tls.trust {
        TrustSource::System => {
            let _ = writeln!(out, "  trust:    bundled web PKI roots");
        },
        TrustSource::Truststore { path, roots } => {
            let _ = writeln!(out, "  trust:    {roots} root(s) from {path}");
        },
    }
    let identity = if tls.presents_identity {
        "client certificate presented"
    } else {
        "none"
    };
    let _ = write!(out, "  identity: {identity}");
}

/// Show all config file paths that are checked.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn show_paths(options: &LoadOptions) -> Result<()> {
    println!("{}", render_paths(options));
    Ok(())
}

fn render_paths(options: &LoadOptions) -> String {
    let mut out = String::new();
    if let Some(path) = &options.path {
        let _ = writeln!(out, "Configuration file (explicit):\n");
        let _ = writeln!(out, "  {}  [{}]", path.display(), status(path));
    } else {
        let _ = writeln!(out, "Configuration files checked (first found wins):\n");
        for (i, path) in options.search_paths.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}  [{}]", i.saturating_add(1), path.display(), status(path));
        }
    }
    let _ = write!(
        out,
        "\nSet {} or pass --config to choose a file.",
        nodecfg_config::loader::CONFIG_ENV_VAR
    );
    out
}

fn status(path: &Path) -> &'static str {
    if path.exists() { "found" } else { "not found" }
}
