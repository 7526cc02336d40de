//! NaCl's zero-padded buffer layout, byte by byte

use naclbox::{
    BOX_ZERO_BYTES, Nonce, SecretKey, ZERO_BYTES, beforenm, open_afternm_padded,
    seal_afternm_padded,
};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let alice = SecretKey::from_array([0x01; 32]);
    let bob = SecretKey::from_array([0x02; 32]);
    let key = beforenm(&bob.public_key(), &alice);
    let nonce = Nonce::from_array([0x24; 24]);

    let mut padded = vec![0u8; ZERO_BYTES];
    padded.extend_from_slice(b"padded message");

    let mut ciphertext = vec![0u8; padded.len()];
    seal_afternm_padded(&mut ciphertext, &padded, &nonce, &key)?;

    println!("plaintext  zero region: {}", hex(&padded[..ZERO_BYTES]));
    println!("ciphertext zero region: {}", hex(&ciphertext[..BOX_ZERO_BYTES]));
    println!("tag:                    {}", hex(&ciphertext[BOX_ZERO_BYTES..ZERO_BYTES]));
    println!("ciphertext body:        {}", hex(&ciphertext[ZERO_BYTES..]));

    let mut recovered = vec![0u8; ciphertext.len()];
    open_afternm_padded(&mut recovered, &ciphertext, &nonce, &key)?;
    println!(
        "recovered:              {:?}",
        String::from_utf8_lossy(&recovered[ZERO_BYTES..])
    );

    Ok(())
}
