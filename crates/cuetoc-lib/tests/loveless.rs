use cuetoc_lib::cd::DiscMode;
use cuetoc_lib::cd::time::frames_from_msf;
use cuetoc_lib::disc::cdtext::{Pti, RemKey};
use cuetoc_lib::format::{Format, parse_str, to_string};
use cuetoc_lib::{ErrorKind, cue, toc};

const LOVELESS: &str = "\
REM GENRE Alternative
REM DATE 1991
REM DISCID 860B640B
REM COMMENT \"ExactAudioCopy v0.95b4\"
PERFORMER \"My Bloody Valentine\"
TITLE \"Loveless\"
FILE \"My Bloody Valentine - Loveless.wav\" WAVE
  TRACK 01 AUDIO
    TITLE \"Only Shallow\"
    PERFORMER \"My Bloody Valentine\"
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE \"Loomer\"
    PERFORMER \"My Bloody Valentine\"
    INDEX 01 04:17:52
";

#[test]
fn reference_sheet_parses_to_expected_model() {
    let disc = parse_str(LOVELESS, Format::Cue).unwrap();
    let split = frames_from_msf(4, 17, 52);

    assert_eq!(disc.track_count(), 2);
    assert_eq!(disc.cdtext.get(Pti::Performer), Some("My Bloody Valentine"));
    assert_eq!(disc.cdtext.get(Pti::Title), Some("Loveless"));
    assert_eq!(disc.cdtext.get(Pti::Genre), Some("Alternative"));
    assert_eq!(disc.cdtext.remark(RemKey::Date), Some("1991"));

    let first = disc.track(1).unwrap();
    assert_eq!(first.start(), Some(0));
    assert_eq!(first.length(), Some(split));
    assert_eq!(first.index(1), Some(0));

    let second = disc.track(2).unwrap();
    assert_eq!(second.start(), Some(split));
    assert_eq!(second.length(), None);
    assert_eq!(second.index(1), second.start());
}

#[test]
fn unknown_remarks_never_reach_the_model() {
    let disc = parse_str(LOVELESS, Format::Cue).unwrap();

    let disc_remarks: Vec<_> = disc.cdtext.remarks().map(|(key, _)| key).collect();
    assert_eq!(disc_remarks, vec![RemKey::Date]);

    let printed = cue::print(&disc);
    assert!(!printed.contains("DISCID"));
    assert!(!printed.contains("COMMENT"));
}

#[test]
fn converts_to_toc_and_back() {
    let disc = parse_str(LOVELESS, Format::Cue).unwrap();

    let toc_text = to_string(&disc, Format::Toc);
    assert!(toc_text.starts_with("CD_DA\n"));
    assert!(toc_text.contains("FILE \"My Bloody Valentine - Loveless.wav\" 0 04:17:52\n"));
    assert!(toc_text.contains("FILE \"My Bloody Valentine - Loveless.wav\" 04:17:52\n"));
    assert!(!toc_text.contains("1991"));

    let from_toc = toc::parse(&toc_text).unwrap();
    assert_eq!(from_toc.mode, DiscMode::CdDa);
    assert_eq!(from_toc.track_count(), 2);
    for (original, converted) in disc.tracks().iter().zip(from_toc.tracks()) {
        assert_eq!(converted.filename(), original.filename());
        assert_eq!(converted.start(), original.start());
        assert_eq!(converted.length(), original.length());
        assert_eq!(converted.index(1), original.index(1));
        assert_eq!(converted.cdtext.get(Pti::Title), original.cdtext.get(Pti::Title));
    }
    assert_eq!(from_toc.cdtext.get(Pti::Genre), Some("Alternative"));
    assert_eq!(from_toc.cdtext.remark(RemKey::Date), None);
}

#[test]
fn hundredth_track_reports_capacity() {
    let mut sheet = String::from("FILE \"a.bin\" BINARY\n");
    for i in 1..=100 {
        sheet.push_str(&format!("TRACK {:02} AUDIO\n", i.min(99)));
    }

    let err = parse_str(&sheet, Format::Cue).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    let err = parse_str(&"TRACK AUDIO\n".repeat(100), Format::Toc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
}
