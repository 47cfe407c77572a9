use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use lango_core::io::{list_corpora, resolve_data_dir, read_words};
use lango_core::{Chain, ChainError, QuotaRounding};

/// Extension of the word lists served from the data directory.
const CORPUS_EXTENSION: &str = "dat";

/// Server configuration
#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP server generating words from trained Markov chains")]
struct Args {
	/// Directory holding the `.dat` word lists
	#[arg(long, default_value = "./data")]
	data_dir: String,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters for the `/v1/load` endpoint
#[derive(Deserialize)]
struct LoadParams {
	name: Option<String>,
	prefix_len: Option<usize>,
	rounding: Option<String>,
}

/// Query parameters naming a loaded chain
#[derive(Deserialize)]
struct ChainQuery {
	name: Option<String>,
}

/// Body of the `/v1/stats` endpoint
#[derive(Serialize)]
struct ChainStats {
	name: String,
	prefix_len: usize,
	rounding: String,
	prefixes: usize,
	vowel_quota: usize,
	consonant_quota: usize,
}

/// Chains built so far, keyed by corpus name.
///
/// `generate` never mutates a chain, so generation only takes the read lock.
struct SharedData {
	data_dir: PathBuf,
	chains: RwLock<HashMap<String, Chain>>,
}

impl LoadParams {
	/// Determines the quota rounding, `nearest` when absent.
	fn rounding(&self) -> Result<QuotaRounding, String> {
		match &self.rounding {
			None => Ok(QuotaRounding::default()),
			Some(s) => s.parse(),
		}
	}
}

/// Returns the trimmed corpus name if it is a plain file stem.
fn corpus_name(name: Option<&str>) -> Result<&str, String> {
	match name.map(str::trim) {
		None | Some("") => Err("Missing or empty corpus name".into()),
		Some(s) if s.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') => Ok(s),
		Some(s) => Err(format!("Invalid corpus name '{s}'")),
	}
}

fn chain_error_response(error: ChainError) -> HttpResponse {
	match &error {
		ChainError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
			HttpResponse::NotFound().body(error.to_string())
		}
		ChainError::Io { .. } => HttpResponse::InternalServerError().body(error.to_string()),
		_ => HttpResponse::BadRequest().body(error.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<SharedData>) -> impl Responder {
	match list_corpora(&data.data_dir, CORPUS_EXTENSION) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded")]
async fn get_loaded(data: web::Data<SharedData>) -> impl Responder {
	let chains = match data.chains.read() {
		Ok(c) => c,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	let mut names: Vec<&str> = chains.keys().map(String::as_str).collect();
	names.sort_unstable();
	HttpResponse::Ok().body(names.join("\n"))
}

#[put("/v1/load")]
async fn put_load(data: web::Data<SharedData>, query: web::Query<LoadParams>) -> impl Responder {
	let name = match corpus_name(query.name.as_deref()) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let rounding = match query.rounding() {
		Ok(r) => r,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let prefix_len = query.prefix_len.unwrap_or(1);

	let path = data.data_dir.join(format!("{name}.{CORPUS_EXTENSION}"));
	let words = match read_words(&path) {
		Ok(w) => w,
		Err(e) => return chain_error_response(e),
	};

	let mut chain = match Chain::with_rounding(prefix_len, rounding) {
		Ok(c) => c,
		Err(e) => return chain_error_response(e),
	};
	if let Err(e) = chain.build(&words) {
		return chain_error_response(e);
	}

	let mut chains = match data.chains.write() {
		Ok(c) => c,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	info!("loaded corpus '{name}' ({} words, prefix length {prefix_len})", words.len());
	chains.insert(name.to_owned(), chain);

	HttpResponse::Ok().body("Corpus loaded successfully")
}

#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<ChainQuery>) -> impl Responder {
	let name = match corpus_name(query.name.as_deref()) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let chains = match data.chains.read() {
		Ok(c) => c,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match chains.get(name) {
		Some(chain) => HttpResponse::Ok().body(chain.generate()),
		None => HttpResponse::NotFound().body(format!("Corpus '{name}' is not loaded")),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>, query: web::Query<ChainQuery>) -> impl Responder {
	let name = match corpus_name(query.name.as_deref()) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let chains = match data.chains.read() {
		Ok(c) => c,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match chains.get(name) {
		Some(chain) => HttpResponse::Ok().json(ChainStats {
			name: name.to_owned(),
			prefix_len: chain.prefix_len(),
			rounding: chain.rounding().to_string(),
			prefixes: chain.len(),
			vowel_quota: chain.vowel_quota(),
			consonant_quota: chain.consonant_quota(),
		}),
		None => HttpResponse::NotFound().body(format!("Corpus '{name}' is not loaded")),
	}
}

/// Registers every endpoint.
fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_corpora)
		.service(get_loaded)
		.service(put_load)
		.service(get_generated)
		.service(get_stats);
}

/// Main entry point for the server.
///
/// Starts with no chain loaded: corpora are trained on demand through
/// `PUT /v1/load` and kept in memory until the process exits.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let shared_data = web::Data::new(SharedData {
		data_dir: resolve_data_dir(&args.data_dir),
		chains: RwLock::new(HashMap::new()),
	});
	info!("serving corpora from {}", shared_data.data_dir.display());

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn shared_data(dir: &tempfile::TempDir) -> web::Data<SharedData> {
		std::fs::write(dir.path().join("spanish.dat"), "kaixo\nhola\nola\nhola\n").unwrap();
		std::fs::write(dir.path().join("empty.dat"), "").unwrap();
		web::Data::new(SharedData {
			data_dir: dir.path().to_path_buf(),
			chains: RwLock::new(HashMap::new()),
		})
	}

	#[actix_web::test]
	async fn test_load_then_generate() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared_data(&dir)).configure(routes)).await;

		let req = test::TestRequest::put().uri("/v1/load?name=spanish&prefix_len=2").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/generate?name=spanish").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "hola");

		let req = test::TestRequest::get().uri("/v1/loaded").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "spanish");
	}

	#[actix_web::test]
	async fn test_stats() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared_data(&dir)).configure(routes)).await;

		let req = test::TestRequest::put().uri("/v1/load?name=spanish&prefix_len=2&rounding=floor").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/stats?name=spanish").to_request();
		let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats["rounding"], "floor");
		assert_eq!(stats["vowel_quota"], 2);
		assert_eq!(stats["consonant_quota"], 1);
		assert_eq!(stats["prefixes"], 9);
	}

	#[actix_web::test]
	async fn test_corpora() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared_data(&dir)).configure(routes)).await;

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "empty\nspanish");
	}

	#[actix_web::test]
	async fn test_load_errors() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared_data(&dir)).configure(routes)).await;

		let cases = [
			("/v1/load?name=basque", StatusCode::NOT_FOUND),
			("/v1/load?name=empty", StatusCode::BAD_REQUEST),
			("/v1/load?name=spanish&prefix_len=0", StatusCode::BAD_REQUEST),
			("/v1/load?name=spanish&prefix_len=33", StatusCode::BAD_REQUEST),
			("/v1/load?name=spanish&prefix_len=18446744073709551615", StatusCode::BAD_REQUEST),
			("/v1/load?name=spanish&rounding=ceil", StatusCode::BAD_REQUEST),
			("/v1/load?name=..%2Fsecret", StatusCode::BAD_REQUEST),
			("/v1/load", StatusCode::BAD_REQUEST),
		];
		for (uri, status) in cases {
			let req = test::TestRequest::put().uri(uri).to_request();
			assert_eq!(test::call_service(&app, req).await.status(), status, "{uri}");
		}

		let req = test::TestRequest::get().uri("/v1/generate?name=spanish").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
	}
}
