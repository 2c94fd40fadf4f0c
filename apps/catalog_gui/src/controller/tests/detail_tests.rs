use shared::domain::{ItemType, ScriptRecord};

use super::*;

fn adguard() -> ScriptRecord {
    ScriptRecord {
        title: "AdGuard Home".to_string(),
        item_type: ItemType::Lxc,
        description: "Network-wide ad blocking. Open `http://IP:3000` after install.".to_string(),
        install_command: "bash -c \"$(wget -qLO - https://example.invalid/adguard.sh)\"".to_string(),
        default_cpu: "1".to_string(),
        default_ram: "512".to_string(),
        default_hdd: "2".to_string(),
        port: 3000,
        website: "https://adguard.com".to_string(),
        created: "2024-04-18 07:30:00.000Z".to_string(),
        is_updateable: true,
        ..ScriptRecord::default()
    }
}

#[test]
fn segments_backtick_spans_as_code() {
    assert_eq!(
        segment_text("Run `update` then `reboot` now"),
        vec![
            Segment::Text("Run ".into()),
            Segment::Code("update".into()),
            Segment::Text(" then ".into()),
            Segment::Code("reboot".into()),
            Segment::Text(" now".into()),
        ]
    );
}

#[test]
fn unpaired_backtick_stays_in_text() {
    assert_eq!(
        segment_text("a `b` c `d"),
        vec![
            Segment::Text("a ".into()),
            Segment::Code("b".into()),
            Segment::Text(" c `d".into()),
        ]
    );
    assert_eq!(segment_text("``"), Vec::<Segment>::new());
    assert_eq!(segment_text(""), Vec::<Segment>::new());
}

#[test]
fn install_label_shortens_on_compact_layouts() {
    assert_eq!(install_button_label("bash x.sh", false), "bash x.sh");
    assert_eq!(install_button_label("bash x.sh", true), COPY_INSTALL_LABEL);
    assert_eq!(install_button_label("", false), COPY_INSTALL_LABEL);
    assert!(is_compact(640.0));
    assert!(!is_compact(641.0));
}

#[test]
fn describes_an_lxc_script() {
    let view = describe(&adguard());

    assert_eq!(view.date_added.as_deref(), Some("2024-04-18"));
    assert_eq!(view.port, Some(3000));
    assert_eq!(view.default_resources.as_ref().map(|r| r.ram.as_str()), Some("512"));
    assert!(view.alpine_resources.is_none());
    assert_eq!(
        view.links,
        vec![ExternalLink {
            label: "Website",
            url: "https://adguard.com".into()
        }]
    );
    assert!(view.description.contains(&Segment::Code("http://IP:3000".into())));
    assert_eq!(view.install.heading, "How to install");
    assert_eq!(
        view.install.default_tab.lines,
        vec![
            "To create a new Proxmox VE AdGuard Home LXC, run the command below in the Proxmox VE Shell.".to_string(),
            "To Update AdGuard Home, run the command below (or type update) in the LXC Console.".to_string(),
        ]
    );
    assert!(view.install.alpine_tab.is_none());
}

#[test]
fn describes_a_host_tool_with_alpine_variant_and_alerts() {
    let mut record = adguard();
    record.item_type = ItemType::Misc;
    record.port = 0;
    record.has_alpine_script = true;
    record.alpine_script = "bash alpine.sh".into();
    record.alert1 = "Back up first with `vzdump`".into();
    record.alert2 = "Second".into();

    let view = describe(&record);
    assert_eq!(view.install.heading, "How to use");
    assert!(view.install.default_tab.lines.is_empty());
    assert_eq!(view.port, None);
    let alpine = view.install.alpine_tab.expect("alpine tab");
    assert_eq!(alpine.command, "bash alpine.sh");
    assert!(alpine.lines[1].starts_with("To create a new Proxmox VE Alpine-AdGuard Home"));
    assert_eq!(view.alerts.len(), 2);
    assert_eq!(view.alerts[0][1], Segment::Code("vzdump".into()));
}

#[test]
fn open_emits_one_load_per_key() {
    let mut state = ScriptDetailState::default();
    assert!(matches!(
        state.open("Docker"),
        Some(BackendCommand::LoadScript { ref key }) if key == "Docker"
    ));
    assert!(state.open("Docker").is_none());
    assert_eq!(*state.status(), DetailStatus::Loading);
    assert!(state.open("  ").is_none());
}

#[test]
fn stale_responses_are_dropped() {
    let mut state = ScriptDetailState::default();
    state.open("Docker");
    state.open("Plex");

    assert!(!state.apply_loaded("Docker", adguard()));
    assert!(state.record().is_none());
    assert!(!state.apply_failed("Docker", "boom"));

    assert!(state.apply_loaded("Plex", adguard()));
    assert_eq!(state.record().map(|r| r.title.as_str()), Some("AdGuard Home"));
}

#[test]
fn failure_allows_retrying_the_same_key() {
    let mut state = ScriptDetailState::default();
    state.open("Docker");
    assert!(state.apply_failed("Docker", "record not found"));
    assert_eq!(
        *state.status(),
        DetailStatus::Failed("record not found".to_string())
    );
    assert!(state.open("Docker").is_some());
}

#[test]
fn close_resets_everything() {
    let mut state = ScriptDetailState::default();
    state.open("Docker");
    state.apply_loaded("Docker", adguard());
    state.set_install_tab(InstallTab::Alpine);
    state.close();
    assert_eq!(state.requested(), None);
    assert_eq!(*state.status(), DetailStatus::Idle);
    assert_eq!(state.install_tab(), InstallTab::Default);
    // A late response after closing is ignored.
    assert!(!state.apply_loaded("Docker", adguard()));
}

#[test]
fn copy_toasts() {
    assert_eq!(CopyKind::InstallCommand.toast(), "Copied install command to clipboard");
    assert_eq!(CopyKind::Port.toast(), "Copied port to clipboard");
}

#[test]
fn compact_layout_hides_port_and_links() {
    let view = describe(&adguard());

    let (port, links) = view.quick_facts(false);
    assert_eq!(port, Some(3000));
    assert_eq!(links.len(), 1);

    let (port, links) = view.quick_facts(true);
    assert_eq!(port, None);
    assert!(links.is_empty());
}

#[test]
fn empty_install_command_still_gets_a_copy_button_label() {
    let mut record = adguard();
    record.install_command.clear();
    let view = describe(&record);

    assert!(view.install.default_tab.command.is_empty());
    assert_eq!(install_button_label(&view.install.default_tab.command, false), COPY_INSTALL_LABEL);
    assert_eq!(COPY_HINT, "click to copy");
}
