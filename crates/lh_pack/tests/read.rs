use lh_pack::{
    error::{Error, Result},
    names::texture_block_name,
    resolve::TextureRecord,
    types::{DdsHeader, DdsPixelFormat, TextureHeader},
    PackFile, ReadOptions,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tracing::info;
use tracing_test::traced_test;

fn dds_header(four_cc: &[u8; 4], width: u32, height: u32, linear_size: u32) -> DdsHeader {
    DdsHeader {
        size: 124,
        flags: 0x0008_1007,
        height,
        width,
        pitch_or_linear_size: linear_size,
        mip_map_count: 1,
        format: DdsPixelFormat {
            size: 32,
            flags: 0x4,
            four_cc: *four_cc,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn block(name: &str, data: &[u8]) -> Vec<u8> {
    let mut block = name.as_bytes().to_vec();
    block.resize(32, 0);
    block.extend_from_slice(&(data.len() as u32).to_le_bytes());
    block.extend_from_slice(data);
    block
}

/// A mesh pack assembled by hand, with blocks deliberately out of name order
fn mesh_pack() -> Result<Vec<u8>> {
    let texture = TextureRecord::new(1, 0, dds_header(b"DXT1", 4, 4, 8), vec![0x55; 8])?;

    #[rustfmt::skip]
    let info = [
        0x01, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    #[rustfmt::skip]
    let meshes = [
        0x4D, 0x4B, 0x4A, 0x43,
        0x00, 0x00, 0x00, 0x00,
    ];

    let mut pack = b"LiOnHeAd".to_vec();
    pack.extend(block("MESHES", &meshes));
    pack.extend(block("INFO", &info));
    pack.extend(block("1", &texture.to_block()?));
    Ok(pack)
}

#[traced_test]
#[test]
fn resolve_minimal_mesh_pack() -> Result<()> {
    let pack = PackFile::open(Cursor::new(mesh_pack()?), ReadOptions::default())?;

    assert!(pack.is_mesh_pack());
    assert!(!pack.is_animation_pack());
    assert_eq!(pack.directory().len(), 3);
    assert_eq!(pack.texture_count(), 1);
    assert_eq!(pack.mesh_count(), 0);

    let texture = pack.texture(1)?;
    assert_eq!(
        texture.header,
        TextureHeader {
            size: 124 + 8,
            id: 1,
            kind: 0,
            dds_size: 4 + 124 + 8,
        }
    );
    assert_eq!(texture.pixels, vec![0x55; 8]);

    Ok(())
}

#[traced_test]
#[test]
fn info_entries_reference_texture_blocks() -> Result<()> {
    let pack = PackFile::open(Cursor::new(mesh_pack()?), ReadOptions::default())?;

    for entry in pack.info_lookup() {
        let name = texture_block_name(entry.block_id);
        info!("checking {}", name);

        let block = pack.block(&name)?;
        assert_eq!(&block[4..8], &entry.block_id.to_le_bytes());
        assert_eq!(pack.texture(entry.block_id)?.id(), entry.block_id);
    }

    Ok(())
}

#[traced_test]
#[test]
fn zero_linear_size_dxt1() -> Result<()> {
    // 9x5 rounds up to 3x2 blocks
    let texture = TextureRecord::new(0xC0, 0, dds_header(b"DXT1", 9, 5, 0), vec![0x11; 48])?;

    let mut pack = b"LiOnHeAd".to_vec();
    pack.extend(block("INFO", &[1, 0, 0, 0, 0xC0, 0, 0, 0, 0, 0, 0, 0]));
    pack.extend(block("MESHES", b"MKJC\0\0\0\0"));
    pack.extend(block("c0", &texture.to_block()?));

    let pack = PackFile::open(Cursor::new(pack), ReadOptions::default())?;
    let texture = pack.texture(0xC0)?;
    assert_eq!(texture.dds_header.pitch_or_linear_size, 3 * 2 * 8);
    assert_eq!(texture.pixels.len(), 48);

    Ok(())
}

#[traced_test]
#[test]
fn truncated_streams_are_too_small() -> Result<()> {
    let pack = mesh_pack()?;

    for len in 0..8 + 36 {
        let result = PackFile::open(Cursor::new(&pack[..len]), ReadOptions::default());
        assert!(matches!(result, Err(Error::FileTooSmall)), "length {len}");
    }

    Ok(())
}

#[traced_test]
#[test]
fn any_magic_byte_change_is_unrecognized() -> Result<()> {
    let pack = mesh_pack()?;

    for i in 0..8 {
        let mut input = pack.clone();
        input[i] = input[i].wrapping_add(1);
        let result = PackFile::open(Cursor::new(input), ReadOptions::default());
        assert!(matches!(result, Err(Error::UnrecognizedHeader)));
    }

    Ok(())
}

#[traced_test]
#[test]
fn missing_texture_block_stops_resolution() -> Result<()> {
    let mut pack = b"LiOnHeAd".to_vec();
    pack.extend(block("INFO", &[1, 0, 0, 0, 0xAB, 0, 0, 0, 0, 0, 0, 0]));
    pack.extend(block("MESHES", b"MKJC\0\0\0\0"));

    let result = PackFile::open(Cursor::new(pack.clone()), ReadOptions::default());
    assert!(matches!(result, Err(Error::MissingTextureBlock(name)) if name == "ab"));

    let options = ReadOptions::builder().textures(false).build();
    let pack = PackFile::open(Cursor::new(pack), options)?;
    assert_eq!(pack.info_lookup().len(), 1);
    assert_eq!(pack.texture_count(), 0);

    Ok(())
}

#[traced_test]
#[test]
fn resolve_sound_bank() -> Result<()> {
    let mut sample = [0u8; 640];
    sample[..12].copy_from_slice(b"C:\\boom.wav\0");
    sample[268..272].copy_from_slice(&3u32.to_le_bytes());
    sample[272..276].copy_from_slice(&1u32.to_le_bytes());

    let mut table = vec![1, 0, 1, 0];
    table.extend_from_slice(&sample);

    let mut pack = b"LiOnHeAd".to_vec();
    pack.extend(block("LHAudioBankSampleTable", &table));
    pack.extend(block("LHAudioWaveData", &[0, 7, 8, 9, 0]));

    let pack = PackFile::open(Cursor::new(pack), ReadOptions::default())?;
    assert!(pack.is_sound_bank());
    assert_eq!(pack.bank_name(), None);

    let (sample, data) = pack.sample(0)?;
    assert_eq!(sample.file_name(), "boom.wav");
    assert_eq!(data, &[7, 8, 9]);

    Ok(())
}
