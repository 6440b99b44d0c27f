//! Device discovery — one sensor per recognized catalog entry.

use neviweb_app::ports::NeviwebClient;
use neviweb_domain::device::DeviceDescriptor;

use crate::sensor::Neviweb130Sensor;

/// Build a sensor for every descriptor whose model is recognized.
///
/// Descriptors without a signature, without a model, or with a model
/// outside the leak-detector and tank-monitor sets are skipped silently.
/// Display names are `"{name_prefix} {device name}"`.
pub fn discover<C>(
    catalog: &[DeviceDescriptor],
    client: &C,
    name_prefix: &str,
) -> Vec<Neviweb130Sensor<C>>
where
    C: NeviwebClient + Clone,
{
    catalog
        .iter()
        .filter_map(|device| {
            let family = device.family()?;
            let name = format!("{name_prefix} {}", device.name);
            tracing::debug!(sensor = %name, id = %device.id, model = ?device.model(), "setting up sensor");
            Some(Neviweb130Sensor::new(
                client.clone(),
                device.id.clone(),
                name,
                family.is_monitor(),
            ))
        })
        .collect()
}
