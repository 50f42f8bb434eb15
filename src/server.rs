use std::{
    env,
    path::PathBuf,
    sync::Mutex,
};

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use colored::Colorize;
use dashmap::DashMap;
use futures::channel::oneshot::{self, Sender};

use crate::{
    error::Result,
    problem::{writer, Problem},
    settings::Config,
};

/// Problems with large samples easily exceed actix' default payload limit
const MAX_PAYLOAD: usize = 32 * 1024 * 1024;

/*
    # Flow of `ru parse`

    parse(...) ──► bind listener ──► "Waiting for you..."
                                          │
    ┌────── POST / from the extension ◄───┘
    │
    └──► receive_problem(...) ──► create_problem(...) ──► all problems received?
                                                                │
    server.stop(graceful) ◄──── oneshot done channel ◄──────────┘
*/

/// State shared between the request handler and the shutdown waiter
pub struct ParseState {
    // Problem directories are created here
    root: PathBuf,

    // Problems received so far per contest batch id
    batches: DashMap<String, usize>,

    // Fired once every expected problem has been written
    done: Mutex<Option<Sender<()>>>,
}

impl ParseState {
    pub fn new(root: PathBuf, done: Sender<()>) -> ParseState {
        ParseState {
            root,
            batches: DashMap::new(),
            done: Mutex::new(Some(done)),
        }
    }

    /// Counts a received problem, returns true once the parse is complete
    ///
    /// Batch problems count even when writing them failed, a lone problem
    /// only completes the parse once it is on disk.
    fn record(&self, problem: &Problem, written: bool) -> bool {
        let expected = problem.expected_problems();
        match &problem.batch {
            Some(batch) if expected > 1 => {
                let mut received = self.batches.entry(batch.id.clone()).or_insert(0);
                *received += 1;
                info!("Batch {}: {}/{} problems", batch.id, *received, expected);
                *received >= expected
            }
            _ => written,
        }
    }

    fn finish(&self) {
        let sender = match self.done.lock() {
            Ok(mut done) => done.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }
}

async fn receive_problem(body: web::Bytes, state: web::Data<ParseState>) -> impl Responder {
    let problem = match Problem::from_slice(&body) {
        Ok(problem) => problem,
        Err(e) => {
            error!("Rejected payload of {} bytes: {}", body.len(), e);
            println!("{}", e.to_string().red());
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };
    info!(
        "Received {} with {} tests from {:?} ({:?})",
        problem.name,
        problem.tests.len(),
        problem.group,
        problem.url
    );
    debug!(
        "Limits for {}: {:?} ms, {:?} MB",
        problem.name, problem.time_limit, problem.memory_limit
    );

    let written = writer::create_problem(&state.root, &problem).await;
    if let Err(e) = &written {
        println!();
        println!("{}", e.to_string().red());
    }

    if state.record(&problem, written.is_ok()) {
        state.finish();
    }
    match written {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD))
        .route("/", web::post().to(receive_problem));
}

/// Waits for the browser extension to push a problem (or a whole contest), then shuts down
pub async fn parse(config: &Config) -> Result<()> {
    serve(config, env::current_dir()?).await
}

/// Serves the parse endpoint until every expected problem was received, writing problems into `root`
pub async fn serve(config: &Config, root: PathBuf) -> Result<()> {
    let (done_tx, done_rx) = oneshot::channel::<()>();
    let state = web::Data::new(ParseState::new(root, done_tx));

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .workers(1)
        .bind((config.address.as_str(), config.port))?
        .run();
    info!("Listening on {}:{}", config.address, config.port);

    // Stop gracefully so the extension still gets its response
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if done_rx.await.is_ok() {
            trace!("All problems received, stopping server");
            handle.stop(true).await;
        }
    });

    println!("Waiting for you...");
    server.await?;
    Ok(())
}
