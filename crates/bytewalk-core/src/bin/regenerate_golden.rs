use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bytewalk_core::layouts::Layout;
use bytewalk_core::layouts::mbr::layout as mbr;
use bytewalk_core::layouts::zip::layout as zip;

const LICENSE_TEXT: &str = "MIT License\r\n\r\nCopyright (c) 2023 Matt Janda\r\n";
const ZIP_FILE_NAME: &[u8] = b"AutoByte.sln";
const ZIP_EXTRA_FIELD: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    for layout in Layout::ALL {
        let dir = root.join(layout.name());
        fs::create_dir_all(&dir)
            .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
        regenerate_one(layout, &dir)?;
    }
    Ok(())
}

fn regenerate_one(layout: Layout, dir: &Path) -> Result<(), String> {
    let input = dir.join("input.bin");
    let bytes = fixture(layout);
    fs::write(&input, &bytes)
        .map_err(|err| format!("failed to write {}: {}", input.display(), err))?;

    let decoded = layout
        .decode(&bytes)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string_pretty(&decoded)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;

    let output = dir.join("expected_record.json");
    fs::write(&output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    println!("{}: {} bytes", layout.name(), bytes.len());
    Ok(())
}

fn fixture(layout: Layout) -> Vec<u8> {
    match layout {
        Layout::Mbr => mbr_sector(),
        Layout::ZipLocalHeader => zip_local_header(),
        Layout::LicenseText => license_text(),
    }
}

struct PartitionSpec {
    boot_indicator: u8,
    starting_chs: [u8; mbr::CHS_LEN],
    partition_type: u8,
    ending_chs: [u8; mbr::CHS_LEN],
    starting_lba: u32,
    size_in_lba: u32,
}

impl PartitionSpec {
    fn empty() -> Self {
        Self {
            boot_indicator: 0,
            starting_chs: [0; mbr::CHS_LEN],
            partition_type: 0,
            ending_chs: [0; mbr::CHS_LEN],
            starting_lba: 0,
            size_in_lba: 0,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.boot_indicator);
        out.extend_from_slice(&self.starting_chs);
        out.push(self.partition_type);
        out.extend_from_slice(&self.ending_chs);
        out.extend_from_slice(&self.starting_lba.to_le_bytes());
        out.extend_from_slice(&self.size_in_lba.to_le_bytes());
    }
}

// Active Linux partition, an extended partition, an unregistered type and
// one unused slot.
fn mbr_sector() -> Vec<u8> {
    let mut sector: Vec<u8> = (0..mbr::BOOT_CODE_LEN).map(|i| (i * 7) as u8).collect();
    sector[..3].copy_from_slice(&[0xeb, 0x63, 0x90]);

    let partitions = [
        PartitionSpec {
            boot_indicator: mbr::BOOT_INDICATOR_ACTIVE,
            starting_chs: [0x20, 0x21, 0x00],
            partition_type: 0x83,
            ending_chs: [0xfe, 0xff, 0xff],
            starting_lba: 2048,
            size_in_lba: 409_600,
        },
        PartitionSpec {
            boot_indicator: 0,
            starting_chs: [0xfe, 0xff, 0xff],
            partition_type: 0x05,
            ending_chs: [0xfe, 0xff, 0xff],
            starting_lba: 411_648,
            size_in_lba: 1_024_000,
        },
        PartitionSpec {
            partition_type: 0x42,
            starting_lba: 7,
            size_in_lba: 9,
            ..PartitionSpec::empty()
        },
        PartitionSpec::empty(),
    ];
    for partition in &partitions {
        partition.write(&mut sector);
    }
    sector.extend_from_slice(&mbr::BOOT_SIGNATURE.to_le_bytes());
    debug_assert_eq!(sector.len(), mbr::MBR_SIZE);
    sector
}

fn zip_local_header() -> Vec<u8> {
    let mut header = zip::LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes().to_vec();
    header.extend_from_slice(&20u16.to_le_bytes()); // version needed
    header.extend_from_slice(&0u16.to_le_bytes()); // flags
    header.extend_from_slice(&8u16.to_le_bytes()); // deflate
    header.extend_from_slice(&0x5463u16.to_le_bytes());
    header.extend_from_slice(&0x5696u16.to_le_bytes());
    header.extend_from_slice(&0xbd6a_7f45u32.to_le_bytes());
    header.extend_from_slice(&603u32.to_le_bytes());
    header.extend_from_slice(&2292u32.to_le_bytes());
    header.extend_from_slice(&(ZIP_FILE_NAME.len() as u16).to_le_bytes());
    header.extend_from_slice(&(ZIP_EXTRA_FIELD.len() as u16).to_le_bytes());
    debug_assert_eq!(header.len(), zip::LOCAL_FILE_HEADER_FIXED_LEN);
    header.extend_from_slice(ZIP_FILE_NAME);
    header.extend_from_slice(&ZIP_EXTRA_FIELD);
    header
}

fn license_text() -> Vec<u8> {
    let mut data = (LICENSE_TEXT.len() as i16).to_le_bytes().to_vec();
    data.extend_from_slice(LICENSE_TEXT.as_bytes());
    data
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use bytewalk_core::layouts::Layout;

    use super::fixture;

    #[test]
    fn fixtures_match_checked_in_inputs() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("tests")
            .join("golden");
        for layout in Layout::ALL {
            let path = root.join(layout.name()).join("input.bin");
            let on_disk = fs::read(&path).expect("read input.bin");
            assert_eq!(fixture(layout), on_disk, "stale fixture for {}", layout.name());
            assert!(layout.decode(&on_disk).is_ok());
        }
    }
}
