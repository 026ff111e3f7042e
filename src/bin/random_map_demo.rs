//! Smoke test for `RandomMap`: insert three pairs, remove two, sample the
//! survivor and print it. Set `RUST_LOG=trace` to see the index events.

use random_map::RandomMap;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut m: RandomMap<String, String> = RandomMap::new();
    m.insert("1".into(), "A".into());
    m.insert("2".into(), "B".into());
    m.insert("3".into(), "C".into());

    m.remove("3");
    m.remove("1");
    tracing::info!(len = m.len(), "entries after removals");

    match m.random_key() {
        Some(key) => {
            let value = m.get(key).map(String::as_str).unwrap_or("<absent>");
            println!("Random Key: {} Value at Random Key: {}", key, value);
        }
        None => println!("Random Key: <none>"),
    }
}
