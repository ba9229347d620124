use std::io::Write;

use futures::stream::{self, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info, span, warn};

use crate::city::City;
use crate::controller::{RequestState, Ticket, ViewController};
use crate::error::AppError;
use crate::presentation;
use crate::source::WeatherSource;
use crate::weather::WeatherReading;

/// Outcome of one spawned fetch, sent back to the view loop.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<WeatherReading, AppError>,
}

/// Turn one line of input into a selection.
///
/// A single token naming a city (id, display name or region code) selects it
/// directly; anything else is treated as a click chain, innermost id first.
pub fn apply_input(controller: &mut ViewController, input: &str) -> Option<Ticket> {
    let ids: Vec<&str> = input.split_whitespace().collect();
    if let [single] = ids.as_slice() {
        if let Ok(city) = single.parse::<City>() {
            return Some(controller.select(city));
        }
    }
    controller.click(ids)
}

/// Fetch in the background and report back on `tx`.
pub fn spawn_fetch(source: WeatherSource, ticket: Ticket, tx: mpsc::UnboundedSender<Completion>) {
    let fetch_span = span!(tracing::Level::INFO, "fetch", seq = ticket.seq, city = ticket.city.id());
    tokio::spawn(
        async move {
            let outcome = source.fetch(ticket.city.display_name()).await;
            if tx.send(Completion { ticket, outcome }).is_err() {
                debug!("view closed before response arrived");
            }
        }
        .instrument(fetch_span),
    );
}

fn print_view<W: Write>(out: &mut W, state: &RequestState) -> Result<(), AppError> {
    writeln!(out, "{}", presentation::render(state))?;
    out.flush()?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> Result<(), AppError> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Interactive view on stdin/stdout.
pub async fn watch(source: WeatherSource) -> anyhow::Result<()> {
    info!("Using {}", source);
    info!("Enter a city or a click chain (e.g. `path12 AL11 regions`). Send `exit` to stop");

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout().lock();
    run_view(source, input, &mut out).await?;
    Ok(())
}

/// Reads selections line by line and re-renders after every state change.
/// Overlapping selections are not cancelled; whichever response arrives last
/// is what stays on screen. Lines that are not valid UTF-8 are skipped.
///
/// Returns the state on screen when input ends or `exit` is read.
pub async fn run_view<R, W>(
    source: WeatherSource,
    mut input: R,
    out: &mut W,
) -> Result<RequestState, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = ViewController::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    // bytes of a partly read line survive a cancelled read, so only clear after a full line
    let mut buf = Vec::new();

    print_view(out, controller.state())?;
    prompt(out)?;

    let mut exited = false;
    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf) => {
                if read? == 0 {
                    break;
                }
                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line.to_string(),
                    Err(e) => {
                        warn!("Ignoring input line that is not valid UTF-8: {}", e);
                        buf.clear();
                        prompt(out)?;
                        continue;
                    }
                };
                buf.clear();

                let text = line.trim_start_matches('>').trim();
                if text.is_empty() {
                    prompt(out)?;
                    continue;
                }
                if text == "exit" {
                    info!("User wants to exit");
                    exited = true;
                    break;
                }
                if let Some(ticket) = apply_input(&mut controller, text) {
                    spawn_fetch(source.clone(), ticket, tx.clone());
                    print_view(out, controller.state())?;
                }
                prompt(out)?;
            }
            Some(done) = rx.recv() => {
                apply_completion(&mut controller, done);
                writeln!(out)?;
                print_view(out, controller.state())?;
                prompt(out)?;
            }
        }
    }

    // input closed: let in-flight requests land so piped input still shows results
    if !exited {
        drop(tx);
        while let Some(done) = rx.recv().await {
            apply_completion(&mut controller, done);
            print_view(out, controller.state())?;
        }
    }

    Ok(controller.state().clone())
}

fn apply_completion(controller: &mut ViewController, done: Completion) {
    controller.finish(done.ticket, done.outcome);
    if let Some(reading) = controller.reading() {
        info!("Showing weather for {}", reading.city);
    }
}

/// Fetch every city, at most three at a time. Results come back in table order.
pub async fn survey(source: &WeatherSource) -> Vec<(City, Result<WeatherReading, AppError>)> {
    let mut results: Vec<(City, Result<WeatherReading, AppError>)> = stream::iter(City::ALL)
        .map(|city| async move { (city, source.fetch(city.display_name()).await) })
        .buffer_unordered(3)
        .collect()
        .await;
    results.sort_by_key(|(city, _)| *city);
    results
}
