use std::path::Path;

use super::*;
use crate::profile::{Aspect, Profile, VideoNorm, find_profile};
use crate::properties::{PROP_BITRATE, PROP_FFOURCC, PROP_RENDER_SUBTITLE, PropertyRegistry};

fn make_ctx<'a>(profile: &'a Profile, registry: &'a PropertyRegistry) -> RenderContext<'a> {
    RenderContext {
        profile,
        aspect: Aspect::Ratio4x3,
        output_dir: Path::new("/render/out"),
        audio_file: None,
        properties: registry,
    }
}

/// Value following a flag in the argument list.
fn arg_after<'a>(cmd: &'a RenderCommand, flag: &str) -> Option<&'a str> {
    cmd.args
        .iter()
        .position(|a| a == flag)
        .and_then(|i| cmd.args.get(i + 1))
        .map(String::as_str)
}

fn dvd_profile() -> Profile {
    find_profile("DVD", VideoNorm::Pal).unwrap()
}

#[test]
fn dvd_command_uses_mpeg2_and_48k_audio() {
    let registry = PropertyRegistry::new();
    let profile = dvd_profile();
    let cmd = FormatId::Dvd
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert_eq!(cmd.program, "mencoder");
    let lavcopts = arg_after(&cmd, "-lavcopts").unwrap();
    assert!(lavcopts.contains("vcodec=mpeg2video"), "{lavcopts}");
    assert!(lavcopts.contains("acodec=ac3"), "{lavcopts}");
    assert_eq!(arg_after(&cmd, "-srate"), Some("48000"));
    assert!(!cmd.args.iter().any(|a| a == "-sub"));
    assert!(cmd.output_file.ends_with("output.mpg"));
    assert_eq!(cmd.args.last().map(String::as_str), Some("-"));
}

#[test]
fn vcd_command_uses_mpeg1_and_44k_audio() {
    let registry = PropertyRegistry::new();
    let profile = find_profile("VCD", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Vcd
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    let lavcopts = arg_after(&cmd, "-lavcopts").unwrap();
    assert!(lavcopts.contains("vcodec=mpeg1video"), "{lavcopts}");
    assert_eq!(arg_after(&cmd, "-srate"), Some("44100"));
    assert_eq!(arg_after(&cmd, "-af"), Some("lavcresample=44100"));
}

#[test]
fn mpeg_formats_reject_incompatible_profiles() {
    let registry = PropertyRegistry::new();
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    for id in [FormatId::Vcd, FormatId::Svcd, FormatId::Dvd] {
        let err = id
            .strategy()
            .build_command(&make_ctx(&profile, &registry))
            .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)), "{id}: {err}");
    }
}

#[test]
fn key_interval_follows_video_norm() {
    let registry = PropertyRegistry::new();
    let pal = find_profile("SVCD", VideoNorm::Pal).unwrap();
    let ntsc = find_profile("SVCD", VideoNorm::Ntsc).unwrap();

    let strategy = FormatId::Svcd.strategy();
    let pal_cmd = strategy
        .build_command(&make_ctx(&pal, &registry))
        .unwrap();
    let ntsc_cmd = strategy
        .build_command(&make_ctx(&ntsc, &registry))
        .unwrap();

    assert!(arg_after(&pal_cmd, "-lavcopts").unwrap().contains("keyint=15"));
    assert!(arg_after(&ntsc_cmd, "-lavcopts").unwrap().contains("keyint=18"));
}

#[test]
fn aspect_ratio_is_rendered_with_three_decimals() {
    let registry = PropertyRegistry::new();
    let profile = dvd_profile();
    let mut ctx = make_ctx(&profile, &registry);
    ctx.aspect = Aspect::Ratio16x9;

    let cmd = FormatId::Dvd.strategy().build_command(&ctx).unwrap();
    assert!(arg_after(&cmd, "-lavcopts").unwrap().contains("aspect=1.778"));
}

#[test]
fn default_bitrate_defers_to_profile() {
    let registry = PropertyRegistry::new();
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Mpeg4Mp3
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert!(arg_after(&cmd, "-lavcopts").unwrap().contains("vbitrate=2500"));
}

#[test]
fn bitrate_override_wins_over_profile() {
    let registry = PropertyRegistry::new();
    registry.set(FormatId::Mpeg4Mp3, PROP_BITRATE, "3000");
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Mpeg4Mp3
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert!(arg_after(&cmd, "-lavcopts").unwrap().contains("vbitrate=3000"));
}

#[test]
fn non_numeric_bitrate_fails_before_launch() {
    let registry = PropertyRegistry::new();
    registry.set(FormatId::Flash, PROP_BITRATE, "fast");
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    let err = FormatId::Flash
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap_err();

    assert!(matches!(err, CoreError::Configuration(_)), "{err}");
}

#[test]
fn ffourcc_defaults_to_xvid() {
    let registry = PropertyRegistry::new();
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Mpeg4Mp3
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert_eq!(arg_after(&cmd, "-ffourcc"), Some("XVID"));
}

#[test]
fn ffourcc_override_is_used() {
    let registry = PropertyRegistry::new();
    registry.set(FormatId::Mpeg4Mp3, PROP_FFOURCC, "DIVX");
    let profile = find_profile("Medium", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Mpeg4Mp3
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert_eq!(arg_after(&cmd, "-ffourcc"), Some("DIVX"));
}

#[test]
fn subtitle_block_is_appended_when_enabled() {
    let registry = PropertyRegistry::new();
    registry.set(FormatId::Dvd, PROP_RENDER_SUBTITLE, "yes");
    let profile = dvd_profile();
    let cmd = FormatId::Dvd
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert_eq!(arg_after(&cmd, "-sub"), Some("/render/out/output.srt"));
    assert_eq!(arg_after(&cmd, "-subcp"), Some("utf8"));
}

#[test]
fn audio_file_adds_audiofile_argument() {
    let registry = PropertyRegistry::new();
    let profile = dvd_profile();
    let mut ctx = make_ctx(&profile, &registry);
    ctx.audio_file = Some(Path::new("/music/track.mp3"));

    let cmd = FormatId::Dvd.strategy().build_command(&ctx).unwrap();
    assert_eq!(arg_after(&cmd, "-audiofile"), Some("/music/track.mp3"));
}

#[test]
fn flash_command_targets_flv() {
    let registry = PropertyRegistry::new();
    let profile = find_profile("Medium", VideoNorm::Ntsc).unwrap();
    let cmd = FormatId::Flash
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert!(arg_after(&cmd, "-lavcopts").unwrap().contains("vcodec=flv"));
    assert_eq!(arg_after(&cmd, "-ofps"), Some("30000/1001"));
    assert!(cmd.output_file.ends_with("output.flv"));
}

#[test]
fn mjpeg_command_needs_no_bitrate() {
    // MJPEG must build even with a garbage bitrate property elsewhere.
    let registry = PropertyRegistry::new();
    registry.set(FormatId::Mjpeg, PROP_BITRATE, "not-a-number");
    let profile = find_profile("HD", VideoNorm::Pal).unwrap();
    let cmd = FormatId::Mjpeg
        .strategy()
        .build_command(&make_ctx(&profile, &registry))
        .unwrap();

    assert_eq!(arg_after(&cmd, "-lavcopts"), Some("vcodec=mjpeg"));
    assert_eq!(arg_after(&cmd, "-oac"), Some("pcm"));
}

#[test]
fn every_format_starts_with_the_mjpeg_pipe_block() {
    let registry = PropertyRegistry::new();
    let disc = dvd_profile();
    let generic = find_profile("Medium", VideoNorm::Pal).unwrap();

    for id in FormatId::ALL {
        let profile = match id {
            FormatId::Vcd | FormatId::Svcd | FormatId::Dvd => &disc,
            _ => &generic,
        };
        let cmd = id
            .strategy()
            .build_command(&make_ctx(profile, &registry))
            .unwrap();
        assert_eq!(
            cmd.args[..6],
            ["-demuxer", "lavf", "-fps", "25", "-lavfdopts", "format=mjpeg"],
            "{id}"
        );
    }
}

#[test]
fn format_id_round_trips_through_display() {
    for id in FormatId::ALL {
        assert_eq!(id.to_string().parse::<FormatId>().unwrap(), id);
    }
    assert!("divx5".parse::<FormatId>().is_err());
}
