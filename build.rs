#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // L'icona è opzionale: senza res/openbrd.ico il binario resta senza risorse
    if !std::path::Path::new("res/openbrd.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/openbrd.ico")
        .set("FileDescription", "openbrd GPS track recorder")
        .set("ProductName", "openbrd")
        .set("OriginalFilename", "openbrd.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
