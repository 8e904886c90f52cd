use crate::address::Address;
use crate::calibration::CalibrationProfile;
use crate::codec::{decode, encode};
use crate::configuration::Configuration;
use crate::errors::{CurrentReadError, InitializationError, RegisterWriteError};
use crate::measurements::{BusVoltage, CurrentRegister, PowerRegister, ShuntVoltage};
use crate::register::{ReadRegister, RegisterAddress, WriteRegister};
use embedded_hal_async::i2c::I2c;

/// Embedded HAL compatible driver for the INA219
///
/// One driver owns one device. Transactions are issued strictly one after another, there is no
/// locking: share a device between tasks only behind an external lock.
pub struct INA219<I2C> {
    i2c: I2C,
    address: Address,
    profile: Option<CalibrationProfile>,
}

impl<I2C> INA219<I2C>
where
    I2C: I2c,
{
    /// Open an INA219 without selecting a calibration profile
    ///
    /// Nothing is written to the device. Bus and shunt voltage can be read right away, current and
    /// power only after [`Self::select_profile`].
    pub const fn new(i2c: I2C, address: Address) -> Self {
        INA219 {
            i2c,
            address,
            profile: None,
        }
    }

    /// Open an INA219 and select the given calibration profile
    ///
    /// # Errors
    /// If writing the profile fails the I2C device is handed back inside the `InitializationError`.
    pub async fn new_with_profile(
        i2c: I2C,
        address: Address,
        profile: CalibrationProfile,
    ) -> Result<Self, InitializationError<I2C, I2C::Error>> {
        let mut new = INA219::new(i2c, address);

        match new.select_profile(profile).await {
            Ok(()) => Ok(new),
            Err(e) => Err(InitializationError::new(e, new.destroy())),
        }
    }

    /// Destroy the driver returning the underlying I2C device
    ///
    /// This does leave the device in it's current state.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Address of the device this driver talks to
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The profile selected last, if any
    pub const fn profile(&self) -> Option<&CalibrationProfile> {
        self.profile.as_ref()
    }

    /// Select a calibration profile
    ///
    /// Writes the calibration register and afterwards the configuration register. The profile is
    /// only recorded once both writes went through, on failure the previous profile stays active.
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn select_profile(&mut self, profile: CalibrationProfile) -> Result<(), I2C::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Selecting profile {}", profile.name());

        self.write(profile.calibration_register()).await?;
        self.write(profile.configuration()).await?;

        self.profile = Some(profile);
        Ok(())
    }

    /// Read the current [`Configuration`]
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn configuration(&mut self) -> Result<Configuration, I2C::Error> {
        self.read().await
    }

    /// Read the last measured bus voltage together with the conversion flags
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn bus_voltage(&mut self) -> Result<BusVoltage, I2C::Error> {
        self.read().await
    }

    /// Read the last measured bus voltage in V
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn bus_voltage_v(&mut self) -> Result<f32, I2C::Error> {
        Ok(self.bus_voltage().await?.volts())
    }

    /// Read the last measured shunt voltage
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn shunt_voltage(&mut self) -> Result<ShuntVoltage, I2C::Error> {
        self.read().await
    }

    /// Read the last measured shunt voltage in mV
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn shunt_voltage_mv(&mut self) -> Result<f32, I2C::Error> {
        Ok(self.shunt_voltage().await?.millivolts())
    }

    /// Read the current register
    ///
    /// A sharp load can reset the INA219 which clears the calibration register, after which the
    /// current register reads zero. So the calibration of the selected profile is written again
    /// right before every read.
    ///
    /// # Errors
    /// Returns `NotCalibrated` when no profile was selected yet, otherwise Err() when the
    /// underlying I2C device returns an error.
    pub async fn current_raw(&mut self) -> Result<CurrentRegister, CurrentReadError<I2C::Error>> {
        let profile = self.calibrated()?;
        self.write(profile.calibration_register()).await?;

        Ok(self.read().await?)
    }

    /// Read the current in mA, scaled by the selected profile
    ///
    /// # Errors
    /// See [`Self::current_raw`].
    pub async fn current_ma(&mut self) -> Result<f32, CurrentReadError<I2C::Error>> {
        let profile = self.calibrated()?;
        let CurrentRegister(raw) = self.current_raw().await?;

        Ok(profile.current_ma(raw))
    }

    /// Read the power register
    ///
    /// Like the current, the calibration is written again before the read. The value is not
    /// scaled, see [`CalibrationProfile::power_divider_mw`].
    ///
    /// # Errors
    /// See [`Self::current_raw`].
    pub async fn power_raw(&mut self) -> Result<PowerRegister, CurrentReadError<I2C::Error>> {
        let profile = self.calibrated()?;
        self.write(profile.calibration_register()).await?;

        Ok(self.read().await?)
    }

    /// Read any register and decode it according to its signedness
    ///
    /// # Errors
    /// Returns Err() when the underlying I2C device returns an error.
    pub async fn read_raw(&mut self, reg: RegisterAddress) -> Result<i32, I2C::Error> {
        let bytes = self.read_bytes(reg).await?;
        Ok(decode(bytes, reg.signedness()))
    }

    /// Write a value to the configuration or calibration register
    ///
    /// The value is truncated to 16 bits. This bypasses the selected profile: the divisors used for
    /// [`Self::current_ma`] stay the same and the next current read writes the profile's
    /// calibration again.
    ///
    /// # Errors
    /// Returns `ReadOnly` for the measurement registers, otherwise Err() when the underlying I2C
    /// device returns an error.
    pub async fn write_raw(
        &mut self,
        reg: RegisterAddress,
        value: i32,
    ) -> Result<(), RegisterWriteError<I2C::Error>> {
        if !reg.is_writable() {
            return Err(RegisterWriteError::ReadOnly(reg));
        }

        self.write_bytes(reg, encode(value)).await?;
        Ok(())
    }

    fn calibrated(&self) -> Result<CalibrationProfile, CurrentReadError<I2C::Error>> {
        self.profile.ok_or(CurrentReadError::NotCalibrated)
    }

    /// Read the register dictated by the type
    async fn read<Reg: ReadRegister>(&mut self) -> Result<Reg, I2C::Error> {
        let bytes = self.read_bytes(Reg::ADDRESS).await?;
        Ok(Reg::from_bits(u16::from_be_bytes(bytes)))
    }

    /// Write the value contained in the register to the address dictated by its type
    async fn write<Reg: WriteRegister>(&mut self, reg: Reg) -> Result<(), I2C::Error> {
        self.write_bytes(Reg::ADDRESS, encode(i32::from(reg.as_bits())))
            .await
    }

    async fn read_bytes(&mut self, reg: RegisterAddress) -> Result<[u8; 2], I2C::Error> {
        let mut buf: [u8; 2] = [0x00; 2];
        self.i2c
            .write_read(self.address.as_byte(), &[reg.as_byte()], &mut buf)
            .await?;

        #[cfg(feature = "defmt")]
        defmt::trace!("{} => {=[u8]:#x}", reg, &buf[..]);

        Ok(buf)
    }

    async fn write_bytes(&mut self, reg: RegisterAddress, bytes: [u8; 2]) -> Result<(), I2C::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("{} <= {=[u8]:#x}", reg, &bytes[..]);

        let [val0, val1] = bytes;
        self.i2c
            .write(self.address.as_byte(), &[reg.as_byte(), val0, val1])
            .await
    }
}
