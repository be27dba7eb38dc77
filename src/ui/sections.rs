use crate::format::format_core_line;
use crate::layout::{CoreLine, DashboardView, Section, SectionKind};
use crate::system::cpuinfo::StaticCpuInfo;
use crate::system::hwmon::SensorKind;
use crate::system::sensors::{
    FanCoolingEntry, SensorMap, SensorPolicy, build_fan_cooling_view, select_essential_temps,
};
use crate::system::snapshot::SystemSnapshot;

/// Turns one snapshot into formatted lines. Empty sections are left out.
pub fn build_view(
    snapshot: &SystemSnapshot,
    info: &StaticCpuInfo,
    cpu_fields: &[String],
    policy: &SensorPolicy,
) -> DashboardView {
    DashboardView {
        model_name: info.model_name().to_string(),
        cores: core_lines(snapshot),
        sections: build_sections(snapshot, info, cpu_fields, policy),
    }
}

pub fn core_lines(snapshot: &SystemSnapshot) -> Vec<CoreLine> {
    snapshot
        .frequencies
        .iter()
        .map(|(id, &mhz)| CoreLine {
            id: id.0,
            text: format_core_line(id.0, mhz, snapshot.usage.get(id).copied()),
        })
        .collect()
}

pub fn build_sections(
    snapshot: &SystemSnapshot,
    info: &StaticCpuInfo,
    cpu_fields: &[String],
    policy: &SensorPolicy,
) -> Vec<Section> {
    let sensors = &snapshot.sensors;
    let essential = select_essential_temps(&sensors.temps, policy);
    let fans: Vec<String> = build_fan_cooling_view(&sensors.fans, &sensors.duty_cycles)
        .iter()
        .map(FanCoolingEntry::display_line)
        .collect();
    let cpu_info: Vec<String> = cpu_fields
        .iter()
        .filter_map(|field| info.field(field).map(|value| format!("{field}: {value}")))
        .collect();

    [
        Section::new(
            SectionKind::Temperatures,
            title("Temperatures", SensorKind::Temperature),
            readings(&essential, |v| format!("{v:5.1}")),
        ),
        Section::new(
            SectionKind::FanCooling,
            title("Fan Speeds", SensorKind::Fan),
            fans,
        ),
        Section::new(SectionKind::CpuInfo, "Additional CPU Info:", cpu_info),
        Section::new(
            SectionKind::Voltages,
            title("Voltages", SensorKind::Voltage),
            readings(&sensors.voltages, |v| format!("{v:5.3}")),
        ),
        Section::new(
            SectionKind::Power,
            title("Power", SensorKind::Power),
            readings(&sensors.power, |v| format!("{v:6.3}")),
        ),
    ]
    .into_iter()
    .filter(|s| !s.items.is_empty())
    .collect()
}

fn title(label: &str, kind: SensorKind) -> String {
    format!("{label} ({}):", kind.unit())
}

fn readings(map: &SensorMap, value: impl Fn(f64) -> String) -> Vec<String> {
    map.iter()
        .map(|(name, reading)| format!("{name}: {}", value(reading.value)))
        .collect()
}
