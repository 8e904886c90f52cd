use ina219_profiles::address::Address;
use ina219_profiles::calibration::CalibrationProfile;
use ina219_profiles::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;
    let mut ina =
        SyncIna219::new_with_profile(device, Address::default(), CalibrationProfile::RANGE_32V_2A)?;

    // Wait until a result is ready
    let conversion_us = ina.configuration()?.conversion_time_us().unwrap_or(0);
    std::thread::sleep(std::time::Duration::from_micros(u64::from(conversion_us)));

    println!("Bus Voltage: {} V", ina.bus_voltage_v()?);
    println!("Shunt Voltage: {} mV", ina.shunt_voltage_mv()?);
    println!("Current: {} mA", ina.current_ma()?);

    let power = ina.power_raw()?;
    let divider = CalibrationProfile::RANGE_32V_2A.power_divider_mw();
    println!("Power: {} counts (legacy divider {})", power.0, divider);

    Ok(())
}
