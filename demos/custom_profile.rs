use ina219_profiles::address::Address;
use ina219_profiles::calibration::{CalibrationProfile, MicroAmpere};
use ina219_profiles::configuration::{Configuration, Resolution, ShuntVoltageRange};
use ina219_profiles::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // A 10mΩ shunt with up to 8A, averaging 16 samples
    let configuration = Configuration {
        shunt_voltage_range: ShuntVoltageRange::Fsr80mv,
        shunt_resolution: Resolution::Avg16,
        ..Configuration::default()
    };
    let profile =
        CalibrationProfile::from_current_lsb("32V/8A", MicroAmpere(250), 10_000, configuration)
            .ok_or("calibration out of range")?;

    let device = I2cdev::new("/dev/i2c-1")?;
    let mut ina = SyncIna219::new(device, Address::default());
    ina.select_profile(profile)?;

    println!("{}: calibration {:#06x}", profile.name(), profile.calibration_value());
    println!("Current: {} mA", ina.current_ma()?);

    Ok(())
}
