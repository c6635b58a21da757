//! # Server
//!
//! A TCP front end: every accepted connection gets an independent REPL whose
//! input and output are the socket. All sessions share one root environment,
//! so a `define` in one session is visible to the others.

use std::{
    io::{self, BufReader},
    net::{TcpListener, TcpStream},
    sync::Arc,
    thread,
};

use anyhow::Context;

use crate::repl::{Repl, BANNER};
use crate::sexpr::Environment;

/// Listens on `localhost:<port>` until the process ends. Fails only on
/// setup; per-connection trouble is logged and survived.
pub fn serve(port: u16, root: Arc<Environment>) -> anyhow::Result<()> {
    let listener =
        TcpListener::bind(("localhost", port)).with_context(|| format!("binding port {port}"))?;
    log::info!("Listening on port {port}");

    for stream in listener.incoming() {
        match stream {
            Err(error) => log::error!("accept: {error}"),
            Ok(stream) => {
                let root = Arc::clone(&root);
                thread::spawn(move || handle_connection(stream, port, root));
            }
        }
    }
    Ok(())
}

fn handle_connection(stream: TcpStream, port: u16, root: Arc<Environment>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_owned());
    log::info!("session {peer} opened");

    let reader = match stream.try_clone() {
        Ok(reader) => BufReader::new(reader),
        Err(error) => {
            log::error!("session {peer}: {error}");
            return;
        }
    };

    let mut repl = Repl::new(peer.clone(), reader, stream, io::stderr());
    repl.set_preface(BANNER);
    repl.set_prompt(format!("scam:{port}> "));
    if let Err(error) = repl.run(&root) {
        log::error!("session {peer}: {error}");
    }
    log::info!("session {peer} closed");
}
