//! Node kinds and the static table of vendor properties.
//!
//! The table is the only place that knows about vendors. Lookups never fail:
//! a kind that is not in the table gets the generic linux properties.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How a kind names the interfaces of its links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    /// `eth{n}`: linux and most container images.
    Eth,
    /// `ethernet-1/{n}`: slot/port appliances.
    SlotPort,
    /// `ge-0/0/{n-1}`: zero-based port numbering.
    ZeroBasedPort,
    /// `ether{n}`: proprietary port prefix.
    Ether,
}

/// Static properties of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    /// Internal identifier, as shown in the palette.
    pub id: &'static str,
    /// Kind written into the manifest.
    pub external: &'static str,
    /// Other manifest kinds that decode to this kind.
    pub aliases: &'static [&'static str],
    /// Image assigned to freshly created nodes.
    pub image: &'static str,
    /// Interface naming rule.
    pub naming: NamingRule,
}

const GENERIC: KindSpec = KindSpec {
    id: "linux",
    external: "linux",
    aliases: &[],
    image: "alpine:latest",
    naming: NamingRule::Eth,
};

/// Internal node kind.
///
/// `Other` carries kinds this build does not know. They keep their name for
/// display but behave exactly like [`Kind::Linux`] everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// Generic linux container.
    Linux,
    /// FRRouting container (a linux kind with a routing image).
    Frr,
    /// Nokia SR Linux.
    Nokia,
    /// Arista cEOS.
    Arista,
    /// Juniper vSRX.
    Juniper,
    /// VyOS.
    Vyos,
    /// MikroTik RouterOS.
    Mikrotik,
    /// A kind this build does not know.
    ///
    /// Holds a name no known kind uses. Build kinds from names with
    /// [`Kind::from`] or [`str::parse`], which only fall back to `Other` for
    /// unknown names; `Kind::Other("nokia".into())` would display as `nokia`
    /// yet behave as linux.
    Other(String),
}

impl Kind {
    /// Every known kind, in palette order.
    pub const ALL: [Kind; 7] = [
        Kind::Linux,
        Kind::Frr,
        Kind::Nokia,
        Kind::Arista,
        Kind::Juniper,
        Kind::Vyos,
        Kind::Mikrotik,
    ];

    /// The registry row for this kind.
    pub fn spec(&self) -> KindSpec {
        match self {
            Kind::Linux | Kind::Other(_) => GENERIC,
            Kind::Frr => KindSpec {
                id: "frr",
                external: "linux",
                aliases: &[],
                image: "frrouting/frr:latest",
                naming: NamingRule::Eth,
            },
            Kind::Nokia => KindSpec {
                id: "nokia",
                external: "nokia_srlinux",
                aliases: &["srl"],
                image: "ghcr.io/nokia/srlinux:latest",
                naming: NamingRule::SlotPort,
            },
            Kind::Arista => KindSpec {
                id: "arista",
                external: "ceos",
                aliases: &["arista_ceos"],
                image: "ceos:latest",
                naming: NamingRule::Eth,
            },
            Kind::Juniper => KindSpec {
                id: "juniper",
                external: "juniper_vsrx",
                aliases: &["vr-vsrx", "vr-juniper_vsrx"],
                image: "vrnetlab/vr-vsrx:latest",
                naming: NamingRule::ZeroBasedPort,
            },
            Kind::Vyos => KindSpec {
                id: "vyos",
                external: "vyosnetworks_vyos",
                aliases: &[],
                image: "vyos/vyos:1.3.0",
                naming: NamingRule::Eth,
            },
            Kind::Mikrotik => KindSpec {
                id: "mikrotik",
                external: "mikrotik_ros",
                aliases: &["vr-ros", "vr-mikrotik_ros"],
                image: "mikrotik/ros:latest",
                naming: NamingRule::Ether,
            },
        }
    }

    /// Internal identifier (`Other` kinds keep their own name).
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Other(name) => name,
            known => known.spec().id,
        }
    }

    /// Kind written into the manifest.
    pub fn external_kind(&self) -> &'static str {
        self.spec().external
    }

    /// Image given to new nodes of this kind.
    pub fn default_image(&self) -> &'static str {
        self.spec().image
    }

    /// Interface naming rule.
    pub fn interface_rule(&self) -> NamingRule {
        self.spec().naming
    }

    /// Whether this kind is in the table.
    pub fn is_known(&self) -> bool {
        !matches!(self, Kind::Other(_))
    }

    /// Best-effort inverse of [`Kind::external_kind`].
    ///
    /// When several internal kinds share a manifest kind, the one whose
    /// default image names the same repository as `image` wins, otherwise the
    /// first in [`Kind::ALL`]. Repositories compare on their last two path
    /// components, so `quay.io/frrouting/frr:9.1.0` still reads as FRR.
    /// Unrecognized manifest kinds decode as [`Kind::Linux`].
    ///
    /// A linux node running an FRR image decodes as [`Kind::Frr`]: the
    /// manifest holds nothing else to tell them apart.
    pub fn from_external(external: &str, image: Option<&str>) -> Kind {
        let all = Kind::ALL;
        let candidates: Vec<&Kind> = all
            .iter()
            .filter(|kind| {
                let spec = kind.spec();
                spec.external == external || spec.aliases.contains(&external)
            })
            .collect();

        let Some(first) = candidates.first().copied() else {
            return Kind::Linux;
        };
        if candidates.len() == 1 {
            return first.clone();
        }
        let wanted = image.map(repository_path);
        candidates
            .into_iter()
            .find(|kind| Some(repository_path(kind.default_image())) == wanted)
            .unwrap_or(first)
            .clone()
    }
}

/// Strip the tag from an image reference: `frrouting/frr:8.4` -> `frrouting/frr`.
/// A registry port (`host:5000/repo`) is left alone.
fn image_repository(image: &str) -> &str {
    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    match image[name_start..].find(':') {
        Some(i) => &image[..name_start + i],
        None => image,
    }
}

/// The last two path components of an image's repository, ignoring the
/// registry: `quay.io/frrouting/frr:9.1.0` -> `frrouting/frr`.
fn repository_path(image: &str) -> &str {
    let repository = image_repository(image);
    match repository.rmatch_indices('/').nth(1) {
        Some((i, _)) => &repository[i + 1..],
        None => repository,
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Kind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Kind::Other(s.to_owned())))
    }
}

impl From<String> for Kind {
    fn from(s: String) -> Self {
        match Kind::from_str(&s) {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Kind {
    fn from(s: &str) -> Self {
        Kind::from(s.to_owned())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_kinds_match_vendor_table() {
        assert_eq!(Kind::Linux.external_kind(), "linux");
        assert_eq!(Kind::Frr.external_kind(), "linux");
        assert_eq!(Kind::Nokia.external_kind(), "nokia_srlinux");
        assert_eq!(Kind::Arista.external_kind(), "ceos");
        assert_eq!(Kind::Juniper.external_kind(), "juniper_vsrx");
        assert_eq!(Kind::Vyos.external_kind(), "vyosnetworks_vyos");
        assert_eq!(Kind::Mikrotik.external_kind(), "mikrotik_ros");
    }

    #[test]
    fn unknown_kind_fails_closed_to_linux() {
        let kind = Kind::from("cisco_xrd");
        assert_eq!(kind, Kind::Other("cisco_xrd".into()));
        assert_eq!(kind.as_str(), "cisco_xrd");
        assert_eq!(kind.external_kind(), "linux");
        assert_eq!(kind.default_image(), "alpine:latest");
        assert_eq!(kind.interface_rule(), NamingRule::Eth);
        assert!(!kind.is_known());
    }

    #[test]
    fn parse_round_trips_known_ids() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from(kind.as_str()), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn from_external_recognizes_vendors_and_aliases() {
        assert_eq!(Kind::from_external("nokia_srlinux", None), Kind::Nokia);
        assert_eq!(Kind::from_external("srl", None), Kind::Nokia);
        assert_eq!(Kind::from_external("ceos", None), Kind::Arista);
        assert_eq!(Kind::from_external("vr-vsrx", None), Kind::Juniper);
        assert_eq!(Kind::from_external("mikrotik_ros", None), Kind::Mikrotik);
        assert_eq!(Kind::from_external("vyosnetworks_vyos", None), Kind::Vyos);
    }

    #[test]
    fn from_external_defaults_unrecognized_to_linux() {
        assert_eq!(Kind::from_external("cisco_xrd", Some("xrd:7.9")), Kind::Linux);
        assert_eq!(Kind::from_external("", None), Kind::Linux);
    }

    #[test]
    fn shared_external_kind_uses_image_repository() {
        assert_eq!(
            Kind::from_external("linux", Some("frrouting/frr:v8.4.1")),
            Kind::Frr
        );
        assert_eq!(Kind::from_external("linux", Some("alpine:3.19")), Kind::Linux);
        assert_eq!(Kind::from_external("linux", None), Kind::Linux);
    }

    #[test]
    fn frr_is_recognized_behind_any_registry() {
        for image in [
            "quay.io/frrouting/frr:9.1.0",
            "docker.io/frrouting/frr:latest",
            "registry:5000/frrouting/frr",
        ] {
            assert_eq!(Kind::from_external("linux", Some(image)), Kind::Frr, "{image}");
        }
        assert_eq!(
            Kind::from_external("linux", Some("quay.io/other/frr:9")),
            Kind::Linux
        );
    }

    #[test]
    fn linux_running_frr_image_reads_back_as_frr() {
        let node = Kind::Linux;
        assert_eq!(node.external_kind(), Kind::Frr.external_kind());
        assert_eq!(
            Kind::from_external(node.external_kind(), Some("frrouting/frr:latest")),
            Kind::Frr
        );
    }

    #[test]
    fn repository_path_drops_registry_and_tag() {
        assert_eq!(repository_path("quay.io/frrouting/frr:9.1.0"), "frrouting/frr");
        assert_eq!(repository_path("frrouting/frr:latest"), "frrouting/frr");
        assert_eq!(repository_path("alpine:3.19"), "alpine");
        assert_eq!(repository_path("ghcr.io/nokia/srlinux"), "nokia/srlinux");
    }

    #[test]
    fn names_parse_to_known_kinds_before_other() {
        assert_eq!(Kind::from("nokia"), Kind::Nokia);
        assert_eq!("frr".parse::<Kind>(), Ok(Kind::Frr));
        assert_eq!(Kind::from("sonic").to_string(), "sonic");
    }

    #[test]
    fn image_repository_strips_tag_but_not_registry_port() {
        assert_eq!(image_repository("frrouting/frr:latest"), "frrouting/frr");
        assert_eq!(image_repository("alpine"), "alpine");
        assert_eq!(
            image_repository("registry:5000/team/frr"),
            "registry:5000/team/frr"
        );
        assert_eq!(
            image_repository("registry:5000/team/frr:9"),
            "registry:5000/team/frr"
        );
    }

    #[test]
    fn kind_serializes_as_internal_id() {
        let json = serde_json::to_string(&Kind::Nokia).unwrap();
        assert_eq!(json, "\"nokia\"");
        let back: Kind = serde_json::from_str("\"juniper\"").unwrap();
        assert_eq!(back, Kind::Juniper);
        let other: Kind = serde_json::from_str("\"sonic\"").unwrap();
        assert_eq!(other, Kind::Other("sonic".into()));
    }
}
