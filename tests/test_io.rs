mod common;

use anyhow::Result;
use common::{cleanup_test_dir, create_test_wav, setup_test_dir};
use airscribe::io::audio::read_audio_file_mono;

#[test]
fn test_read_audio_file_mono_mono_16bit() -> Result<()> {
    let test_dir = setup_test_dir()?;
    let audio_path = test_dir.join("test_mono.wav");

    create_test_wav(&audio_path, 1.0, 44100, 1, 16)?;

    let (samples, sr) = read_audio_file_mono(&audio_path)?;

    assert_eq!(sr, 44100);
    assert_eq!(samples.len(), 44100);
    assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));

    cleanup_test_dir(&test_dir)?;
    Ok(())
}

#[test]
fn test_read_audio_file_mono_downmixes_stereo() -> Result<()> {
    let test_dir = setup_test_dir()?;
    let audio_path = test_dir.join("test_stereo.wav");

    create_test_wav(&audio_path, 0.5, 48_000, 2, 16)?;

    let (samples, sr) = read_audio_file_mono(&audio_path)?;

    assert_eq!(sr, 48_000);
    // Stereo frames collapse to one mono sample each.
    assert_eq!(samples.len(), 24_000);

    cleanup_test_dir(&test_dir)?;
    Ok(())
}

#[test]
fn test_read_audio_file_mono_rejects_too_many_channels() -> Result<()> {
    let test_dir = setup_test_dir()?;
    let audio_path = test_dir.join("test_surround.wav");

    create_test_wav(&audio_path, 0.1, 48_000, 6, 16)?;

    let result = read_audio_file_mono(&audio_path);
    assert!(result.is_err());

    cleanup_test_dir(&test_dir)?;
    Ok(())
}
