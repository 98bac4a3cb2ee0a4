use anyhow::{bail, Error};

use crate::channel::Channel;

/// Which channels get a slider and which pair, if any, fades on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelLayout {
    pub manual: Vec<Channel>,
    pub fade: Option<(Channel, Channel)>,
}

impl PanelLayout {
    /// Red on a slider, green and blue fading against each other.
    pub fn fade_demo() -> Self {
        Self {
            manual: vec![Channel::Red],
            fade: Some((Channel::Green, Channel::Blue)),
        }
    }

    /// A slider for every channel and no fade.
    pub fn all_manual() -> Self {
        Self {
            manual: Channel::ALL.to_vec(),
            fade: None,
        }
    }

    /// A channel has exactly one source of duty cycles.
    pub fn validate(&self) -> Result<(), Error> {
        for (i, channel) in self.manual.iter().enumerate() {
            if self.manual[i + 1..].contains(channel) {
                bail!("{} channel has two sliders", channel);
            }
        }

        if let Some((a, b)) = self.fade {
            if a == b {
                bail!("{} channel cannot fade against itself", a);
            }
            for channel in [a, b] {
                if self.manual.contains(&channel) {
                    bail!("{} channel is both manual and fading", channel);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid() {
        assert!(PanelLayout::fade_demo().validate().is_ok());
        assert!(PanelLayout::all_manual().validate().is_ok());
    }

    #[test]
    fn test_rejects_overlap() {
        let layout = PanelLayout {
            manual: vec![Channel::Red, Channel::Green],
            fade: Some((Channel::Green, Channel::Blue)),
        };
        assert!(layout.validate().is_err());

        let layout = PanelLayout {
            manual: vec![],
            fade: Some((Channel::Blue, Channel::Blue)),
        };
        assert!(layout.validate().is_err());

        let layout = PanelLayout {
            manual: vec![Channel::Red, Channel::Red],
            fade: None,
        };
        assert!(layout.validate().is_err());
    }
}
