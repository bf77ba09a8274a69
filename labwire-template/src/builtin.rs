//! Starter topologies compiled into the crate.

use labwire_types::{Kind, Link, Node, TemplateId, Topology};

/// A named, ready-made topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Stable identifier.
    pub id: TemplateId,
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// The graph the template loads.
    pub topology: Topology,
}

const ALPINE: &str = "alpine:latest";
const HOST_TOOLS: &str = "apk add --no-cache iproute2 iputils";

/// Every built-in, in catalog order.
pub fn all() -> Vec<Template> {
    vec![
        linux_bridge_basic(),
        linux_bridge_vlan(),
        linux_bridge_intervlan(),
        switch_two_hosts(),
    ]
}

fn host(id: &str, x: f64, y: f64, address: &str, gateway: Option<&str>) -> Node {
    let mut exec = vec![
        HOST_TOOLS.to_owned(),
        format!("ip addr add {address} dev eth1"),
    ];
    if let Some(gateway) = gateway {
        exec.push(format!("ip route add default via {gateway}"));
    }
    exec.push("ip link set eth1 up".to_owned());
    Node::new(id, Kind::Linux)
        .with_image(ALPINE)
        .at(x, y)
        .with_exec(exec)
}

/// `exec` for a bridge enslaving `eth1..=ethN`.
fn bridge_exec(packages: &str, ports: usize, vlan_filtering: bool) -> Vec<String> {
    let mut exec = vec![format!("apk add --no-cache {packages}")];
    exec.push(if vlan_filtering {
        "ip link add br0 type bridge vlan_filtering 1".to_owned()
    } else {
        "ip link add br0 type bridge".to_owned()
    });
    exec.push("ip link set br0 up".to_owned());
    exec.extend((1..=ports).map(|n| format!("ip link set eth{n} master br0")));
    exec.extend((1..=ports).map(|n| format!("ip link set eth{n} up")));
    exec
}

/// Access ports: eth1/eth2 in VLAN 10, eth3/eth4 in VLAN 20.
fn access_vlans() -> impl Iterator<Item = String> {
    [(10, 1), (10, 2), (20, 3), (20, 4)]
        .into_iter()
        .map(|(vid, port)| format!("bridge vlan add vid {vid} dev eth{port} pvid untagged"))
}

/// `br:eth{n}` to `host{n}:eth1` for each host.
fn bridge_links(hosts: usize) -> impl Iterator<Item = Link> {
    (1..=hosts).map(|n| {
        Link::new(
            format!("e-br-host{n}"),
            "br",
            format!("eth{n}"),
            format!("host{n}"),
            "eth1",
        )
    })
}

fn linux_bridge_basic() -> Template {
    let bridge = Node::new("br", Kind::Linux)
        .with_image(ALPINE)
        .at(250.0, 100.0)
        .with_exec(bridge_exec("bridge-utils iproute2 tcpdump", 2, false));
    Template {
        id: "linux-bridge-basic".into(),
        name: "Linux Bridge Basic".into(),
        description:
            "3-node L2 topology: A Linux bridge connecting two Alpine hosts with static IPs."
                .into(),
        topology: Topology::new(
            vec![
                bridge,
                host("host1", 100.0, 300.0, "192.168.1.1/24", None),
                host("host2", 400.0, 300.0, "192.168.1.2/24", None),
            ],
            bridge_links(2).collect(),
        ),
    }
}

fn linux_bridge_vlan() -> Template {
    let mut exec = bridge_exec("bridge-utils iproute2 vlan tcpdump", 4, true);
    exec.extend(access_vlans());
    let bridge = Node::new("br", Kind::Linux)
        .with_image(ALPINE)
        .at(300.0, 50.0)
        .with_exec(exec);
    Template {
        id: "linux-bridge-vlan".into(),
        name: "Linux Bridge VLAN".into(),
        description:
            "5-node L2 topology: Linux bridge with VLAN filtering (10 & 20) connecting 4 hosts."
                .into(),
        topology: Topology::new(
            vec![
                bridge,
                host("host1", 50.0, 300.0, "192.168.10.1/24", None),
                host("host2", 200.0, 300.0, "192.168.10.2/24", None),
                host("host3", 400.0, 300.0, "192.168.20.1/24", None),
                host("host4", 550.0, 300.0, "192.168.20.2/24", None),
            ],
            bridge_links(4).collect(),
        ),
    }
}

fn linux_bridge_intervlan() -> Template {
    let router = Node::new("r1", Kind::Linux)
        .with_image(ALPINE)
        .at(300.0, 50.0)
        .with_exec([
            HOST_TOOLS,
            "sysctl -w net.ipv4.ip_forward=1",
            "ip link add link eth1 name eth1.10 type vlan id 10",
            "ip link add link eth1 name eth1.20 type vlan id 20",
            "ip addr add 192.168.10.254/24 dev eth1.10",
            "ip addr add 192.168.20.254/24 dev eth1.20",
            "ip link set eth1 up",
            "ip link set eth1.10 up",
            "ip link set eth1.20 up",
        ]);

    // eth5 is the trunk towards the router.
    let mut exec = bridge_exec("bridge-utils iproute2 vlan", 5, true);
    exec.extend(access_vlans());
    exec.push("bridge vlan add vid 10 dev eth5".to_owned());
    exec.push("bridge vlan add vid 20 dev eth5".to_owned());
    let bridge = Node::new("br", Kind::Linux)
        .with_image(ALPINE)
        .at(300.0, 250.0)
        .with_exec(exec);

    let gw10 = Some("192.168.10.254");
    let gw20 = Some("192.168.20.254");
    let mut links: Vec<Link> = bridge_links(4).collect();
    links.push(Link::new("e-r1-br", "r1", "eth1", "br", "eth5"));

    Template {
        id: "linux-bridge-intervlan".into(),
        name: "Linux Bridge Inter-VLAN".into(),
        description: "6-node topology: Router-on-a-Stick with Linux subinterfaces (VLAN 10/20) and a VLAN-aware bridge.".into(),
        topology: Topology::new(
            vec![
                router,
                bridge,
                host("host1", 50.0, 450.0, "192.168.10.1/24", gw10),
                host("host2", 200.0, 450.0, "192.168.10.2/24", gw10),
                host("host3", 400.0, 450.0, "192.168.20.1/24", gw20),
                host("host4", 550.0, 450.0, "192.168.20.2/24", gw20),
            ],
            links,
        ),
    }
}

fn switch_two_hosts() -> Template {
    const IMAGE: &str = "ghcr.io/srl-labs/alpine";
    let node = |id: &str, label: &str, x: f64, y: f64| {
        Node::new(id, Kind::Linux)
            .with_image(IMAGE)
            .with_label(label)
            .at(x, y)
    };
    Template {
        id: "switch-2-hosts".into(),
        name: "Switch w/ 2 Hosts".into(),
        description: "Basic L2 topology: 1 Linux Bridge connected to 2 Alpine hosts.".into(),
        topology: Topology::new(
            vec![
                node("switch-1", "bridge-1", 250.0, 100.0),
                node("host-1", "host-1", 100.0, 300.0),
                node("host-2", "host-2", 400.0, 300.0),
            ],
            vec![
                Link::new("e-switch-1-host-1", "switch-1", "eth1", "host-1", "eth1"),
                Link::new("e-switch-1-host-2", "switch-1", "eth2", "host-2", "eth1"),
            ],
        ),
    }
}
