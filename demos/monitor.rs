use std::env;

use daikin_aircon::Aircon;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let host = args.get(1).expect("usage: monitor <host[:port]>");

    let mut aircon = Aircon::builder(host).name("monitor").build();

    println!("Power:       {:?}", aircon.active().await);
    println!("State:       {:?}", aircon.current_state().await);
    println!("Target:      {:?}", aircon.target_state().await);
    println!(
        "Room:        {:.1}\u{00b0}C / {:.0}%",
        aircon.current_temperature().await,
        aircon.current_relative_humidity().await,
    );
    println!(
        "Set-point:   {:.1}\u{00b0}C",
        aircon.threshold_temperature().await
    );

    println!("\nCapabilities:");
    for cap in aircon.capabilities() {
        match cap.range {
            Some(r) => println!(
                "  {:?} (rw: {}/{}) {}..{} step {}",
                cap.characteristic, cap.readable, cap.writable, r.min, r.max, r.step
            ),
            None => println!(
                "  {:?} (rw: {}/{})",
                cap.characteristic, cap.readable, cap.writable
            ),
        }
    }
}
