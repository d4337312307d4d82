use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use courier_sdk::CourierClient;

#[derive(Parser)]
#[command(name = "courier", about = "Courier message broker CLI")]
struct Cli {
    /// Broker address
    #[arg(long, default_value = "http://localhost:50051", global = true)]
    addr: String,

    /// Queue name (the server's default queue when omitted)
    #[arg(long, default_value = "", global = true)]
    queue: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message and print its ID
    Send {
        /// Message body
        body: String,
    },

    /// Receive a single message, printing its body and receipt handle
    Receive,

    /// Delete a message by receipt handle
    Delete {
        /// Receipt handle from the message's most recent receive
        receipt_handle: String,
    },

    /// Continuously receive messages, deleting each one after printing it
    Consume,
}

async fn connect(addr: &str) -> CourierClient {
    match CourierClient::connect(addr.to_string()).await {
        Ok(client) => client,
        Err(_) => {
            eprintln!("Error: cannot connect to broker at {addr}");
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = connect(&cli.addr).await;

    match cli.command {
        Commands::Send { body } => cmd_send(&client, &cli.queue, body).await,
        Commands::Receive => cmd_receive(&client, &cli.queue).await,
        Commands::Delete { receipt_handle } => cmd_delete(&client, &cli.queue, receipt_handle).await,
        Commands::Consume => cmd_consume(&client, &cli.queue).await,
    }
}

async fn cmd_send(client: &CourierClient, queue: &str, body: String) {
    match client.send(queue, body).await {
        Ok(id) => println!("Message sent, ID: {id}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

async fn cmd_receive(client: &CourierClient, queue: &str) {
    match client.receive(queue).await {
        Ok(Some(msg)) => {
            println!("Message received: {}", msg.body);
            println!("ID: {}", msg.id);
            println!("Receipt handle: {}", msg.receipt_handle);
        }
        Ok(None) => println!("No messages available"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

async fn cmd_delete(client: &CourierClient, queue: &str, receipt_handle: String) {
    match client.delete(queue, &receipt_handle).await {
        Ok(true) => println!("Message deleted"),
        Ok(false) => {
            eprintln!("Error: no live message holds that receipt handle");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Poll loop: back off after three consecutive empty receives, adding 5s per
/// round up to a 30s cap, and reset the delay as soon as a message arrives.
async fn cmd_consume(client: &CourierClient, queue: &str) {
    let max_delay = Duration::from_secs(30);
    let mut delay = Duration::ZERO;
    let mut empty_streak = 0u32;

    loop {
        match client.receive(queue).await {
            Ok(Some(msg)) => {
                empty_streak = 0;
                delay = Duration::ZERO;
                println!("Message received: {}", msg.body);

                match client.delete(queue, &msg.receipt_handle).await {
                    Ok(deleted) => println!("Message deleted: {deleted}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    }
                }
            }
            Ok(None) => {
                empty_streak += 1;
                println!("No message received.");
                if empty_streak >= 3 {
                    delay = (delay + Duration::from_secs(5)).min(max_delay);
                    println!("Backing off for {}s", delay.as_secs());
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
