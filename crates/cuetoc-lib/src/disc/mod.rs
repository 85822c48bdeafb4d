use crate::cd::{DiscMode, MAX_INDEXES, MAX_TRACKS, SubMode, TrackFlags, TrackMode};
use crate::disc::cdtext::Cdtext;
use crate::disc::error::{DiscError, DiscResult};
use std::collections::BTreeMap;
use std::path::Path;

pub mod cdtext;
pub mod error;

/// Container type of a data file as named by a CUE sheet `FILE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Binary,
    Motorola,
    Aiff,
    Wave,
    Mp3,
    Flac,
}

impl FileType {
    /// Guesses the container from the file name suffix, falling back to raw binary.
    pub fn from_file_name(name: &str) -> FileType {
        let extension = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "wav" | "wave" => FileType::Wave,
            "aif" | "aiff" => FileType::Aiff,
            "mp3" => FileType::Mp3,
            "flac" => FileType::Flac,
            _ => FileType::Binary,
        }
    }
}

/// A run of frames making up part of a track. Start and length are in frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataExtent {
    pub name: Option<String>,
    pub file_type: Option<FileType>,
    pub start: Option<u64>,
    pub length: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Zero-filled silence before the track data
    pub pre_gap: DataExtent,
    /// Track data within its file
    pub file: DataExtent,
    /// Zero-filled silence after the track data
    pub post_gap: DataExtent,
    pub mode: TrackMode,
    pub sub_mode: SubMode,
    pub flags: TrackFlags,
    pub isrc: Option<String>,
    pub cdtext: Cdtext,
    // frame offsets within the track's file, keyed by index number
    indexes: BTreeMap<u8, u64>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(&self) -> Option<&str> {
        self.file.name.as_deref()
    }

    pub fn start(&self) -> Option<u64> {
        self.file.start
    }

    pub fn length(&self) -> Option<u64> {
        self.file.length
    }

    pub fn zero_pre(&self) -> Option<u64> {
        self.pre_gap.length
    }

    pub fn zero_post(&self) -> Option<u64> {
        self.post_gap.length
    }

    pub fn set_mode(&mut self, mode: TrackMode) {
        self.mode = mode;
        if mode.is_audio() {
            self.flags.clear(TrackFlags::DATA);
        } else {
            self.flags.set(TrackFlags::DATA);
        }
    }

    pub fn index(&self, number: u8) -> Option<u64> {
        self.indexes.get(&number).copied()
    }

    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    /// Set indexes in ascending index order.
    pub fn indexes(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.indexes.iter().map(|(number, offset)| (*number, *offset))
    }

    /// Sets index `number` to `offset`. Offsets must not decrease with the index number.
    pub fn set_index(&mut self, number: u8, offset: u64) -> DiscResult<()> {
        if number as usize >= MAX_INDEXES {
            return Err(DiscError::TooManyIndexes(number));
        }

        let below = self.indexes.range(..number).next_back().map(|(_, o)| *o);
        let above = self.indexes.range(number + 1..).next().map(|(_, o)| *o);

        if below.is_some_and(|b| offset < b) || above.is_some_and(|a| offset > a) {
            return Err(DiscError::IndexOutOfOrder { number, offset });
        }

        self.indexes.insert(number, offset);
        Ok(())
    }

    /// Appends an index after the highest one set and returns its number.
    pub fn add_index(&mut self, offset: u64) -> DiscResult<u8> {
        let number = match self.indexes.keys().next_back() {
            Some(last) => last.saturating_add(1),
            None => 0,
        };

        self.set_index(number, offset)?;
        Ok(number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disc {
    pub mode: DiscMode,
    /// Media Catalog Number
    pub catalog: Option<String>,
    pub cdtext_file: Option<String>,
    pub cdtext: Cdtext,
    tracks: Vec<Track>,
}

impl Disc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Track by its 1-based number.
    pub fn track(&self, number: usize) -> Option<&Track> {
        number.checked_sub(1).and_then(|i| self.tracks.get(i))
    }

    pub fn track_mut(&mut self, number: usize) -> Option<&mut Track> {
        number.checked_sub(1).and_then(|i| self.tracks.get_mut(i))
    }

    pub fn last_track_mut(&mut self) -> Option<&mut Track> {
        self.tracks.last_mut()
    }

    /// CD-TEXT of the most recent track, or of the disc before the first track.
    pub fn active_cdtext_mut(&mut self) -> &mut Cdtext {
        match self.tracks.last_mut() {
            Some(track) => &mut track.cdtext,
            None => &mut self.cdtext,
        }
    }

    /// Appends an empty track. A full disc is left untouched.
    pub fn add_track(&mut self) -> DiscResult<&mut Track> {
        if self.tracks.len() >= MAX_TRACKS {
            return Err(DiscError::TooManyTracks);
        }

        self.tracks.try_reserve(1)?;
        let position = self.tracks.len();
        self.tracks.push(Track::new());

        Ok(&mut self.tracks[position])
    }

    /// Derives missing lengths of tracks that are followed by another track in the same file.
    /// A track ends where the next one's pregap (index 0) begins, or at its start without one.
    pub fn infer_track_lengths(&mut self) {
        for i in 1..self.tracks.len() {
            let (head, tail) = self.tracks.split_at_mut(i);
            let track = &mut head[i - 1];
            let next = &tail[0];

            if track.file.length.is_some()
                || track.file.name.is_none()
                || track.file.name != next.file.name
            {
                continue;
            }

            let next_begin = next.index(0).or(next.file.start);
            if let (Some(start), Some(next_begin)) = (track.file.start, next_begin) {
                if next_begin >= start {
                    track.file.length = Some(next_begin - start);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::cdtext::Pti;

    fn track_in(name: &str, start: u64) -> Track {
        let mut track = Track::new();
        track.file.name = Some(name.to_string());
        track.file.start = Some(start);
        track
    }

    #[test]
    fn hundredth_track_is_rejected_without_touching_existing_tracks() {
        let mut disc = Disc::new();
        for i in 0..MAX_TRACKS {
            let track = disc.add_track().unwrap();
            track.cdtext.set(Pti::Title, format!("track {i}"));
        }
        let before = disc.clone();

        let result = disc.add_track();
        assert!(matches!(result, Err(DiscError::TooManyTracks)));
        assert_eq!(disc, before);
        assert_eq!(disc.track_count(), 99);
        assert_eq!(disc.track(99).unwrap().cdtext.get(Pti::Title), Some("track 98"));
    }

    #[test]
    fn tracks_are_numbered_from_one() {
        let mut disc = Disc::new();
        disc.add_track().unwrap().isrc = Some("USRC17607839".to_string());

        assert!(disc.track(0).is_none());
        assert_eq!(disc.track(1).unwrap().isrc.as_deref(), Some("USRC17607839"));
        assert!(disc.track(2).is_none());
    }

    #[test]
    fn indexes_must_stay_monotonic() {
        let mut track = Track::new();
        track.set_index(1, 150).unwrap();
        track.set_index(0, 0).unwrap();

        assert!(matches!(
            track.set_index(2, 100),
            Err(DiscError::IndexOutOfOrder { number: 2, .. })
        ));
        assert!(matches!(
            track.set_index(0, 200),
            Err(DiscError::IndexOutOfOrder { number: 0, .. })
        ));

        assert_eq!(track.add_index(300).unwrap(), 2);
        assert_eq!(track.index_count(), 3);
        assert_eq!(
            track.indexes().collect::<Vec<_>>(),
            vec![(0, 0), (1, 150), (2, 300)]
        );
    }

    #[test]
    fn index_99_exceeds_capacity() {
        let mut track = Track::new();
        track.set_index(98, 10).unwrap();
        assert!(matches!(
            track.set_index(99, 20),
            Err(DiscError::TooManyIndexes(99))
        ));
        assert!(matches!(track.add_index(30), Err(DiscError::TooManyIndexes(99))));
        assert_eq!(track.index_count(), 1);
    }

    #[test]
    fn first_added_index_is_index_zero() {
        let mut track = Track::new();
        assert_eq!(track.add_index(0).unwrap(), 0);
        assert_eq!(track.index(0), Some(0));
        assert_eq!(track.index(1), None);
    }

    #[test]
    fn lengths_are_inferred_within_a_shared_file() {
        let mut disc = Disc::new();
        *disc.add_track().unwrap() = track_in("a.wav", 0);
        *disc.add_track().unwrap() = track_in("a.wav", 19327);
        *disc.add_track().unwrap() = track_in("b.wav", 0);
        *disc.add_track().unwrap() = track_in("b.wav", 500);

        disc.infer_track_lengths();

        assert_eq!(disc.track(1).unwrap().length(), Some(19327));
        assert_eq!(disc.track(2).unwrap().length(), None);
        assert_eq!(disc.track(3).unwrap().length(), Some(500));
        assert_eq!(disc.track(4).unwrap().length(), None);
    }

    #[test]
    fn inferred_length_stops_at_the_next_pregap() {
        let mut disc = Disc::new();
        *disc.add_track().unwrap() = track_in("a.wav", 0);
        let mut second = track_in("a.wav", 19327);
        second.set_index(0, 19177).unwrap();
        second.set_index(1, 19327).unwrap();
        *disc.add_track().unwrap() = second;

        disc.infer_track_lengths();

        assert_eq!(disc.track(1).unwrap().length(), Some(19177));
    }

    #[test]
    fn inference_keeps_explicit_lengths_and_skips_negative_spans() {
        let mut disc = Disc::new();
        let mut first = track_in("a.bin", 0);
        first.file.length = Some(42);
        *disc.add_track().unwrap() = first;
        *disc.add_track().unwrap() = track_in("a.bin", 1000);
        *disc.add_track().unwrap() = track_in("a.bin", 10);

        disc.infer_track_lengths();

        assert_eq!(disc.track(1).unwrap().length(), Some(42));
        assert_eq!(disc.track(2).unwrap().length(), None);
        assert_eq!(disc.track(3).unwrap().length(), None);
    }

    #[test]
    fn data_flag_follows_track_mode() {
        let mut track = Track::new();
        track.set_mode(TrackMode::Mode1Raw);
        assert!(track.flags.is_set(TrackFlags::DATA));
        track.set_mode(TrackMode::Audio);
        assert!(!track.flags.is_set(TrackFlags::DATA));
    }

    #[test]
    fn file_type_is_guessed_from_suffix() {
        assert_eq!(FileType::from_file_name("Loveless.WAV"), FileType::Wave);
        assert_eq!(FileType::from_file_name("album.flac"), FileType::Flac);
        assert_eq!(FileType::from_file_name("image.bin"), FileType::Binary);
        assert_eq!(FileType::from_file_name("noext"), FileType::Binary);
    }
}
