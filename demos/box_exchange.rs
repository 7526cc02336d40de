//! Two parties exchanging boxes over a cached shared key
//!
//! Run with `RUST_LOG=naclbox=debug` to see backend selection and
//! authentication failures.

use naclbox::{Nonce, PrecomputedBox, backend, keypair};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("naclbox Box Exchange");
    println!("====================\n");

    let backend = backend::init();
    println!("Primitive backend: {backend}");

    let alice = keypair()?;
    let bob = keypair()?;

    let alice_to_bob = PrecomputedBox::new(bob.public(), alice.secret());
    let bob_from_alice = PrecomputedBox::new(alice.public(), bob.secret());

    // Alice numbers her messages with the nonce; Bob tracks the same counter.
    let mut nonce = Nonce::from_array([0u8; 24]);
    for text in ["hello bob", "are you there?", "bye"] {
        let boxed = alice_to_bob.seal(text.as_bytes(), &nonce);
        let opened = bob_from_alice.open(&boxed, &nonce)?;
        println!(
            "{} -> {} bytes boxed -> {:?}",
            text,
            boxed.len(),
            String::from_utf8_lossy(&opened)
        );
        nonce.increment();
    }

    let mut forged = alice_to_bob.seal(b"pay mallory", &nonce);
    forged[20] ^= 0x01;
    match bob_from_alice.open(&forged, &nonce) {
        Ok(_) => println!("forgery accepted?!"),
        Err(err) => println!("forged box rejected: {err}"),
    }

    Ok(())
}
