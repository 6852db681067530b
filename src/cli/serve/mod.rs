//! Reference HTTP server in front of the resolver.
//!
//! Every request goes through [`Resolver::resolve`] and
//! [`assetbake::http::reply`]; the server adds nothing of its own beyond
//! URL normalization and method checks.

mod lifecycle;
mod response;

pub use lifecycle::setup_shutdown_handler;

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

use assetbake::config::Config;
use assetbake::{Mode, PackedAssets, Resolver, debug, http, log};

use super::ServeArgs;

/// Worker threads handling requests.
const REQUEST_THREADS: usize = 4;

/// Merge command-line overrides into `config.serve`.
///
/// `--dev` and `--pack` also select the resolver mode.
pub fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    Config::update_option(&mut config.serve.base, args.dev.as_ref());
    Config::update_option(&mut config.serve.pack, args.pack.as_ref());
    if args.dev.is_some() {
        config.serve.mode = Mode::Development;
    } else if args.pack.is_some() {
        config.serve.mode = Mode::Compiled;
    }
    if let Some(interface) = args.interface {
        config.serve.interface = interface;
    }
    if let Some(port) = args.port {
        config.serve.port = port;
    }
}

/// Build the resolver selected by `config.serve.mode`.
pub fn build_resolver(config: &Config) -> Result<Resolver> {
    match config.serve.mode {
        Mode::Development => {
            let Some(base) = &config.serve.base else {
                bail!("development mode needs a base directory (--dev <DIR> or serve.base)");
            };
            if !base.is_dir() {
                bail!("`{}` is not a directory", base.display());
            }
            Ok(Resolver::development(base.clone()))
        }
        Mode::Compiled => {
            let Some(pack) = &config.serve.pack else {
                bail!("compiled mode needs a pack artifact (--pack <FILE> or serve.pack)");
            };
            let packed = PackedAssets::open(pack)
                .with_context(|| format!("failed to load {}", pack.display()))?;
            debug!("serve"; "loaded {} assets from {}", packed.table().len(), pack.display());
            Ok(Resolver::compiled(packed))
        }
    }
}

/// Run the serve command (blocking until Ctrl+C).
pub fn run(mut config: Config, args: &ServeArgs) -> Result<()> {
    apply_overrides(&mut config, args);
    let resolver = Arc::new(build_resolver(&config)?);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{} ({} mode)", addr, resolver.mode());
    run_request_loop(&server, &resolver, addr)
}

fn run_request_loop(server: &Server, resolver: &Arc<Resolver>, addr: SocketAddr) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let resolver = Arc::clone(resolver);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &resolver) {
                log!("serve"; "request error: {e}");
            }
        });
    }

    debug!("serve"; "stopped listening on {}", addr);
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, resolver: &Resolver) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !response::is_allowed_method(&request) {
        return response::respond_method_not_allowed(request);
    }

    let path = response::normalize_url(request.url());
    let asset = resolver.resolve(&path);
    let reply = http::reply(asset, response::get_header(&request, "If-None-Match"));

    debug!("serve"; "{} {} → {}", request.method(), path, reply.status);
    response::respond_reply(request, reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetbake::{BakeOptions, Format, bake, emit};
    use std::fs;
    use tempfile::TempDir;

    fn serve_args() -> ServeArgs {
        ServeArgs {
            dev: None,
            pack: None,
            interface: None,
            port: None,
        }
    }

    #[test]
    fn test_dev_flag_selects_development() {
        let mut config = Config::default();
        let args = ServeArgs {
            dev: Some("web".into()),
            port: Some(9000),
            ..serve_args()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.serve.mode, Mode::Development);
        assert_eq!(config.serve.base.as_deref(), Some(std::path::Path::new("web")));
        assert_eq!(config.serve.port, 9000);
    }

    #[test]
    fn test_compiled_requires_pack() {
        assert!(build_resolver(&Config::default()).is_err());
    }

    #[test]
    fn test_build_resolver_from_pack() {
        let dir = TempDir::new().unwrap();
        let web = dir.path().join("web");
        fs::create_dir(&web).unwrap();
        fs::write(web.join("index.html"), "A").unwrap();
        let pack = dir.path().join("site.pack");
        let table = bake(&web, &BakeOptions::default()).unwrap();
        emit::write_artifact(&table, &pack, Format::Pack, None).unwrap();

        let mut config = Config::default();
        apply_overrides(
            &mut config,
            &ServeArgs {
                pack: Some(pack),
                ..serve_args()
            },
        );
        let resolver = build_resolver(&config).unwrap();
        assert_eq!(resolver.mode(), Mode::Compiled);
        assert!(resolver.resolve("/").is_found());
    }

    #[test]
    fn test_build_resolver_dev_missing_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.serve.mode = Mode::Development;
        config.serve.base = Some(dir.path().join("nope"));
        assert!(build_resolver(&config).is_err());
    }
}
