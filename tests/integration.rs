use std::env;

use daikin_aircon::{Active, Aircon};

/// Run with: DAIKIN_HOST=192.168.x.x cargo test --test integration -- --ignored
/// Requires a reachable wireless LAN adapter; reads only, no writes.
#[tokio::test]
#[ignore]
async fn read_live_state() {
    let host = env::var("DAIKIN_HOST").expect("set DAIKIN_HOST to the adapter address");
    let mut aircon = Aircon::builder(host).build();

    let active = aircon.active().await;
    let state = aircon.current_state().await;
    let temp = aircon.current_temperature().await;
    let humidity = aircon.current_relative_humidity().await;

    println!("power: {active:?} | state: {state:?} | room: {temp:.1}C | humidity: {humidity:.0}%");
    assert!(temp > 0.0, "a live unit should report a room temperature");
}

/// Toggle power off and back to its original state. Mutates the unit;
/// only run against hardware you are willing to switch.
#[tokio::test]
#[ignore]
async fn power_roundtrip() {
    let host = env::var("DAIKIN_HOST").expect("set DAIKIN_HOST to the adapter address");
    let mut aircon = Aircon::builder(host).build();

    let before = aircon.active().await;
    aircon.set_active(Active::Inactive).await.expect("power off failed");
    assert_eq!(aircon.active().await, Active::Inactive);

    aircon.set_active(before).await.expect("restore failed");
    assert_eq!(aircon.active().await, before);
}
