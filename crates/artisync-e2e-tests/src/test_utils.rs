use artisync_lib::config::{Config, FailurePolicy};
use bytes::Bytes;
use eyre::Result;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Routes = Arc<Mutex<HashMap<String, (StatusCode, Bytes)>>>;

/// In-process stand-in for the build server. Unknown paths answer 404.
pub struct MockBuildServer {
    addr: SocketAddr,
    routes: Routes,
    requests: Arc<Mutex<Vec<String>>>,
    worker: JoinHandle<()>,
}

impl MockBuildServer {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let routes: Routes = Arc::default();
        let requests: Arc<Mutex<Vec<String>>> = Arc::default();

        let worker = tokio::spawn({
            let routes = routes.clone();
            let requests = requests.clone();
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = routes.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let service = service_fn(move |req: Request<Incoming>| {
                            let response = respond(&routes, &requests, &req);
                            async move { Ok::<_, Infallible>(response) }
                        });
                        if let Err(err) = http1::Builder::new()
                            .keep_alive(false)
                            .serve_connection(TokioIo::new(stream), service)
                            .await
                        {
                            tracing::debug!(?err, "mock connection failed");
                        }
                    });
                }
            }
        });

        Ok(Self {
            addr,
            routes,
            requests,
            worker,
        })
    }

    pub fn route(&self, path: &str, status: StatusCode, body: impl Into<Bytes>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Request paths in the order they were received.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBuildServer {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

fn respond(
    routes: &Routes,
    requests: &Mutex<Vec<String>>,
    req: &Request<Incoming>,
) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();
    tracing::debug!(method = %req.method(), path = %path, "mock request");
    requests.lock().unwrap().push(path.clone());

    let (status, body) = routes
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, Bytes::from_static(b"Not Found")));

    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
}

/// A job status document whose last successful build lives at `build_url`.
pub fn status_document(build_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<freeStyleProject>
  <displayName>jaxws-ri-wls</displayName>
  <url>http://ci.invalid/job/jaxws-ri-wls/</url>
  <lastBuild><number>43</number><url>http://ci.invalid/job/jaxws-ri-wls/43/</url></lastBuild>
  <lastSuccessfulBuild><number>42</number><url>{build_url}</url></lastSuccessfulBuild>
</freeStyleProject>
"#
    )
}

pub fn create_test_config(workspace: &Path, feed_url: String, manifest: &[&str]) -> Config {
    Config {
        workspace: workspace.to_path_buf(),
        feed_url,
        artifact_subpath: "artifact/jaxws-ri/dist/jaxws-ri/lib/".to_string(),
        manifest: manifest.iter().map(|name| name.to_string()).collect(),
        status_file: "urlretrieve.xml".to_string(),
        work_dir: "jaxwstop4".to_string(),
        lib_dir: "libDir".to_string(),
        failure_policy: FailurePolicy::FailFast,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
