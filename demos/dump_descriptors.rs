//! Print the descriptors in a file holding a raw descriptor loop, such as the `descriptor()`
//! bytes cut from a PMT section.

use hex_slice::AsHex;
use mpegts_dash::descriptor::{self, CoreDescriptors};
use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::process;

fn dump(buf: &[u8]) -> Result<(), descriptor::DescriptorError> {
    for desc in descriptor::parse_descriptors(buf)? {
        print!("tag=0x{:02x}", desc.tag());
        if let Some(ext) = desc.tag_extension() {
            print!(" ext=0x{:02x}", ext);
        }
        println!(" len={} {:02x}", desc.length(), desc.payload().as_hex());
        match desc.parse_core() {
            Ok(CoreDescriptors::ISO639Language(lang)) => {
                for l in lang.languages() {
                    println!("    language {:?} {:?}", l.code(), l.audio_type());
                }
            }
            Ok(core) => println!("    {:?}", core),
            Err(e) => println!("    not decoded: {:?}", e),
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(name) = env::args().nth(1) else {
        eprintln!("usage: dump-descriptors <file>|-");
        process::exit(2);
    };
    let mut buf = vec![];
    let read = if name == "-" {
        io::stdin().read_to_end(&mut buf)
    } else {
        File::open(&name).and_then(|mut f| f.read_to_end(&mut buf))
    };
    if let Err(e) = read {
        eprintln!("{}: {}", name, e);
        process::exit(1);
    }
    if let Err(e) = dump(&buf) {
        eprintln!("{}: malformed descriptor loop: {:?}", name, e);
        process::exit(1);
    }
}
