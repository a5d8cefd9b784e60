use anyhow::Result;
use resfs_kit::Filesystem;

fn main() -> Result<()> {
    let mut fs = Filesystem::host();

    // `res://` and `assets://` -> `<cwd>/assets` (created if missing);
    // `user://` and `usr://` -> `<config dir>/hello_world`;
    // `temp://` -> `<config dir>/hello_world/temp`
    fs.initialize("hello_world", "assets")?;
    for (protocol, prefix) in fs.associations() {
        println!("{:<10} -> {}", protocol, prefix);
    }

    // any other protocol can be added next to the reserved ones
    let scratch = std::env::temp_dir().join("resfs_hello_world");
    fs.associate("scratch", scratch.to_string_lossy());

    // parent directories are created on demand
    fs.write_text("scratch://docs/first.txt", "Hello")?;
    fs.write_text("scratch://second.txt", "World")?;
    fs.append_text("scratch://second.txt", "!")?;

    for entry in fs.entries("scratch://") {
        println!("{} -> {}", entry, fs.resolve(&entry));
    }

    let first = fs.read_text("scratch://docs/first.txt")?;
    let second = fs.read_text("scratch://second.txt")?;
    println!("{}, {}", first, second);

    // missing files read as empty content
    assert!(fs.read_binary("scratch://missing.bin")?.is_empty());

    fs.remove_directory("scratch://")?;
    assert!(!fs.exists("scratch://"));
    Ok(())
}
