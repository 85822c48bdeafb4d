use std::collections::BTreeMap;

/// CD-TEXT pack type indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pti {
    Title,
    Performer,
    Songwriter,
    Composer,
    Arranger,
    Message,
    DiscId,
    Genre,
    TocInfo1,
    TocInfo2,
    Reserved1,
    Reserved2,
    Reserved3,
    Reserved4,
    /// UPC/EAN of the disc, or ISRC when held by a track
    UpcIsrc,
    SizeInfo,
}

impl Pti {
    pub const ALL: [Pti; 16] = [
        Pti::Title,
        Pti::Performer,
        Pti::Songwriter,
        Pti::Composer,
        Pti::Arranger,
        Pti::Message,
        Pti::DiscId,
        Pti::Genre,
        Pti::TocInfo1,
        Pti::TocInfo2,
        Pti::Reserved1,
        Pti::Reserved2,
        Pti::Reserved3,
        Pti::Reserved4,
        Pti::UpcIsrc,
        Pti::SizeInfo,
    ];

    /// Statement keyword for this slot. Reserved slots have none.
    pub fn key(self, is_track: bool) -> Option<&'static str> {
        match self {
            Pti::Title => Some("TITLE"),
            Pti::Performer => Some("PERFORMER"),
            Pti::Songwriter => Some("SONGWRITER"),
            Pti::Composer => Some("COMPOSER"),
            Pti::Arranger => Some("ARRANGER"),
            Pti::Message => Some("MESSAGE"),
            Pti::DiscId => Some("DISC_ID"),
            Pti::Genre => Some("GENRE"),
            Pti::TocInfo1 => Some("TOC_INFO1"),
            Pti::TocInfo2 => Some("TOC_INFO2"),
            Pti::Reserved1 | Pti::Reserved2 | Pti::Reserved3 | Pti::Reserved4 => None,
            Pti::UpcIsrc if is_track => Some("ISRC"),
            Pti::UpcIsrc => Some("UPC_EAN"),
            Pti::SizeInfo => Some("SIZE_INFO"),
        }
    }

    pub fn from_key(key: &str) -> Option<Pti> {
        match key {
            "TITLE" => Some(Pti::Title),
            "PERFORMER" => Some(Pti::Performer),
            "SONGWRITER" => Some(Pti::Songwriter),
            "COMPOSER" => Some(Pti::Composer),
            "ARRANGER" => Some(Pti::Arranger),
            "MESSAGE" => Some(Pti::Message),
            "DISC_ID" => Some(Pti::DiscId),
            "GENRE" => Some(Pti::Genre),
            "TOC_INFO1" => Some(Pti::TocInfo1),
            "TOC_INFO2" => Some(Pti::TocInfo2),
            "UPC_EAN" | "ISRC" => Some(Pti::UpcIsrc),
            "SIZE_INFO" => Some(Pti::SizeInfo),
            _ => None,
        }
    }

    /// Slots that carry binary data on the disc rather than character strings.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Pti::DiscId | Pti::Genre | Pti::TocInfo1 | Pti::TocInfo2 | Pti::SizeInfo
        )
    }
}

/// Remark comments recognised by name. Any other remark is dropped by the grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemKey {
    Date,
    DiscNumber,
    ReplayGainAlbumGain,
    ReplayGainAlbumPeak,
    ReplayGainTrackGain,
    ReplayGainTrackPeak,
}

impl RemKey {
    pub const ALL: [RemKey; 6] = [
        RemKey::Date,
        RemKey::DiscNumber,
        RemKey::ReplayGainAlbumGain,
        RemKey::ReplayGainAlbumPeak,
        RemKey::ReplayGainTrackGain,
        RemKey::ReplayGainTrackPeak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RemKey::Date => "DATE",
            RemKey::DiscNumber => "DISCNUMBER",
            RemKey::ReplayGainAlbumGain => "REPLAYGAIN_ALBUM_GAIN",
            RemKey::ReplayGainAlbumPeak => "REPLAYGAIN_ALBUM_PEAK",
            RemKey::ReplayGainTrackGain => "REPLAYGAIN_TRACK_GAIN",
            RemKey::ReplayGainTrackPeak => "REPLAYGAIN_TRACK_PEAK",
        }
    }

    pub fn from_name(name: &str) -> Option<RemKey> {
        RemKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Text metadata of a disc or a track: 16 CD-TEXT slots plus the named remarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cdtext {
    fields: BTreeMap<Pti, String>,
    remarks: BTreeMap<RemKey, String>,
}

impl Cdtext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pti: Pti) -> Option<&str> {
        self.fields.get(&pti).map(String::as_str)
    }

    pub fn set(&mut self, pti: Pti, value: impl Into<String>) {
        self.fields.insert(pti, value.into());
    }

    pub fn clear(&mut self, pti: Pti) {
        self.fields.remove(&pti);
    }

    pub fn remark(&self, key: RemKey) -> Option<&str> {
        self.remarks.get(&key).map(String::as_str)
    }

    pub fn set_remark(&mut self, key: RemKey, value: impl Into<String>) {
        self.remarks.insert(key, value.into());
    }

    pub fn clear_remark(&mut self, key: RemKey) {
        self.remarks.remove(&key);
    }

    /// Set text slots in slot order.
    pub fn fields(&self) -> impl Iterator<Item = (Pti, &str)> + '_ {
        self.fields.iter().map(|(pti, value)| (*pti, value.as_str()))
    }

    /// Set remarks in key order.
    pub fn remarks(&self) -> impl Iterator<Item = (RemKey, &str)> + '_ {
        self.remarks.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// True if at least one of the 16 text slots is set.
    pub fn has_text(&self) -> bool {
        !self.fields.is_empty()
    }

    /// True if no text slot and no remark is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.remarks.is_empty()
    }
}
