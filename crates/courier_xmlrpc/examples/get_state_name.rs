//! Asks an XML-RPC server for the name of a US state by its number.
//!
//! The endpoint defaults to the classic UserLand validator and can be changed with
//! `XMLRPC_ENDPOINT`. Set `RUST_LOG=debug` and `XMLRPC_DEBUG=1` to see the exchanged documents.

use courier_xmlrpc::{Client, ClientArgs, ClientEvent, Value};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), failure::Error> {
    tracing_subscriber::fmt::init();

    let client = Client::with_args(ClientArgs::new("http://betty.userland.com/RPC2"))?;
    let mut events = client.subscribe();

    let number = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(41);

    match client.call("examples.getStateName", vec![Value::Int(number)]).await? {
        Ok(name) => println!("state #{} is {:?}", number, name),
        Err(fault) => println!("the server refused: {}", fault),
    }

    match events.next().await {
        Some(ClientEvent::Success(value)) => println!("broadcast success: {:?}", value),
        Some(ClientEvent::Fault(fault)) => println!("broadcast fault: {}", fault),
        _ => {}
    }

    Ok(())
}
