use std::env;
use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use serde::Deserialize;
use wordchain_core::io::{list_corpora, read_words};
use wordchain_core::model::builder::{Builder, DEFAULT_ORDER};
use wordchain_core::model::chain_model::ChainModel;
use wordchain_core::model::generator::{DEFAULT_MAX_WORDS, generate_many};

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_words: Option<usize>,
	count: Option<usize>,
}

/// Struct representing query parameters for the `/v1/load` endpoint
#[derive(Deserialize)]
struct LoadParams {
	name: String,
	order: Option<usize>,
}

struct SharedData {
	model: Option<Arc<ChainModel>>,
	corpus: Option<String>,
}

/// Directory holding the loadable `.txt` corpora.
fn data_dir() -> String {
	env::var("WORDCHAIN_DATA").unwrap_or_else(|_| "./data".to_owned())
}

/// HTTP GET endpoint `/v1/generate`
///
/// Runs one or more random walks over the loaded model and returns the
/// generated texts, one per line. The model is read-only once built, so the
/// walks run outside the lock.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let max_words = query.max_words.unwrap_or(DEFAULT_MAX_WORDS);
	let count = query.count.unwrap_or(1);

	let model = {
		let shared_data = match data.read() {
			Ok(guard) => guard,
			Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
		};
		match &shared_data.model {
			Some(model) => Arc::clone(model),
			None => return HttpResponse::BadRequest().body("No corpus loaded"),
		}
	};

	match generate_many(&model, count, max_words) {
		Ok(outputs) => {
			let texts: Vec<String> = outputs.iter().map(|words| words.join(" ")).collect();
			HttpResponse::Ok().body(texts.join("\n"))
		}
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus names available for loading.
#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_corpora(data_dir(), "txt") {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP GET endpoint `/v1/loaded`
///
/// Reports the currently loaded corpus and the size of its table.
#[get("/v1/loaded")]
async fn get_loaded(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(guard) => guard,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match (&shared_data.corpus, &shared_data.model) {
		(Some(corpus), Some(model)) => {
			HttpResponse::Ok().body(format!("{} ({} states)", corpus, model.len()))
		}
		_ => HttpResponse::Ok().body("No corpus loaded"),
	}
}

/// HTTP PUT endpoint `/v1/load`
///
/// Learns a fresh model from a corpus file and swaps it in.
#[put("/v1/load")]
async fn put_corpus(data: web::Data<RwLock<SharedData>>, query: web::Query<LoadParams>) -> impl Responder {
	let name = query.name.trim();
	if name.is_empty() {
		return HttpResponse::BadRequest().body("Missing or empty corpus name");
	}
	let order = query.order.unwrap_or(DEFAULT_ORDER);

	let words = match read_words(format!("{}/{}.txt", data_dir(), name)) {
		Ok(words) => words,
		Err(e) => return HttpResponse::NotFound().body(format!("Failed to read corpus: {e}")),
	};

	let mut builder = match Builder::new(order) {
		Ok(builder) => builder,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	builder.feed_words(words);
	let model = builder.finish();
	log::info!("loaded corpus '{}' ({} states, order {})", name, model.len(), order);

	let mut shared_data = match data.write() {
		Ok(guard) => guard,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some(Arc::new(model));
	shared_data.corpus = Some(name.to_owned());

	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Main entry point for the server.
///
/// Starts an Actix-web HTTP server over an initially empty slot; a corpus
/// must be loaded through `/v1/load` before `/v1/generate` can answer.
///
/// # Notes
/// - Binds to 127.0.0.1:5000 unless `WORDCHAIN_ADDR` overrides it.
/// - Corpora are read from `./data` unless `WORDCHAIN_DATA` overrides it.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		model: None,
		corpus: None,
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	let addr = env::var("WORDCHAIN_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	log::info!("serving on {}", addr);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_loaded)
			.service(put_corpus)
	})
		.bind(addr)?
		.run()
		.await
}
