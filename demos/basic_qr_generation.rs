use std::error::Error;

use qrcraft::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, all other settings are automatically chosen
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Convert to image and save
    let img = qr.render(4); // 4 pixels per module
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    println!("{}", qr.to_str(2));
    Ok(())
}
