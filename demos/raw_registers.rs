use ina219_profiles::address::Address;
use ina219_profiles::register::RegisterAddress;
use ina219_profiles::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;
    let mut ina = SyncIna219::new(device, Address::A0);

    for reg in RegisterAddress::ALL {
        println!("{reg:?}: {}", ina.read_raw(reg)?);
    }

    Ok(())
}
