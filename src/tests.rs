use crate::address::Address;
use crate::calibration::CalibrationProfile;
use crate::configuration::{Configuration, OperatingMode, Resolution};
use crate::errors::{CurrentReadError, RegisterWriteError};
use crate::measurements::{CurrentRegister, PowerRegister};
use crate::register::RegisterAddress;
use crate::SyncIna219;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

const DEV_ADDR: u8 = 0x40;
const PROFILE_CONFIG: u16 = 0x3C1F;

/// Create the expected `Transaction` for a register read
fn read_reg(reg: RegisterAddress, value: u16) -> Transaction {
    let [hi, lo] = value.to_be_bytes();
    Transaction::write_read(DEV_ADDR, vec![reg.as_byte()], vec![hi, lo])
}

/// Create the expected `Transaction` for a register write
fn write_reg(reg: RegisterAddress, value: u16) -> Transaction {
    let [hi, lo] = value.to_be_bytes();
    Transaction::write(DEV_ADDR, vec![reg.as_byte(), hi, lo])
}

/// Transactions written when a profile is selected
fn select_transactions(profile: CalibrationProfile) -> Vec<Transaction> {
    vec![
        write_reg(RegisterAddress::Calibration, profile.calibration_value()),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG),
    ]
}

/// Create an `INA219` without profile that will react with the given transactions
fn mock_ready(transactions: &[Transaction]) -> SyncIna219<I2cMock> {
    SyncIna219::new(I2cMock::new(transactions), Address::default())
}

/// Create an `INA219` with the 32V/1A profile selected that will react with the given transactions
fn mock_calibrated(transactions: &[Transaction]) -> SyncIna219<I2cMock> {
    let mut all_transactions = select_transactions(CalibrationProfile::RANGE_32V_1A);
    all_transactions.extend_from_slice(transactions);

    let ina = SyncIna219::new_with_profile(
        I2cMock::new(&all_transactions),
        Address::default(),
        CalibrationProfile::RANGE_32V_1A,
    );
    match ina {
        Ok(ina) => ina,
        Err(e) => panic!("Selecting the profile failed: {e:?}"),
    }
}

#[test]
fn new_does_not_touch_the_device() {
    let ina = mock_ready(&[]);
    assert!(ina.profile().is_none());
    assert_eq!(ina.address(), Address::DEFAULT);
    ina.destroy().done();
}

#[test]
fn select_profile_writes_calibration_then_configuration() {
    let mut ina = mock_ready(&[
        write_reg(RegisterAddress::Calibration, 10_240),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG),
    ]);

    ina.select_profile(CalibrationProfile::RANGE_32V_1A)
        .expect("No errors");
    assert_eq!(ina.profile(), Some(&CalibrationProfile::RANGE_32V_1A));
    assert_eq!(ina.profile().unwrap().current_divider_ma(), 25.0);

    ina.destroy().done();
}

#[test]
fn select_2a_profile() {
    let mut ina = mock_ready(&[
        write_reg(RegisterAddress::Calibration, 4_096),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG),
    ]);

    ina.select_profile(CalibrationProfile::RANGE_32V_2A)
        .expect("No errors");
    assert_eq!(ina.profile().unwrap().current_divider_ma(), 10.0);

    ina.destroy().done();
}

#[test]
fn selecting_twice_is_idempotent() {
    let mut transactions = select_transactions(CalibrationProfile::RANGE_32V_2A);
    transactions.extend(select_transactions(CalibrationProfile::RANGE_32V_2A));
    let mut ina = mock_ready(&transactions);

    ina.select_profile(CalibrationProfile::RANGE_32V_2A).unwrap();
    let first = *ina.profile().unwrap();
    ina.select_profile(CalibrationProfile::RANGE_32V_2A).unwrap();

    assert_eq!(ina.profile(), Some(&first));
    assert_eq!(first.current_divider_ma(), 10.0);
    assert_eq!(first.power_divider_mw(), 2.0);

    ina.destroy().done();
}

#[test]
fn recalibration_switches_profile() {
    let mut ina = mock_calibrated(&[
        write_reg(RegisterAddress::Calibration, 4_096),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG),
        // The new calibration is used for the re-prime
        write_reg(RegisterAddress::Calibration, 4_096),
        read_reg(RegisterAddress::Current, 100),
    ]);

    ina.select_profile(CalibrationProfile::RANGE_32V_2A).unwrap();
    assert_eq!(ina.current_ma().unwrap(), 10.0);

    ina.destroy().done();
}

#[test]
fn failed_calibration_write_keeps_session_unchanged() {
    let mut ina = mock_ready(&[
        write_reg(RegisterAddress::Calibration, 10_240).with_error(ErrorKind::Other)
    ]);

    assert_eq!(
        ina.select_profile(CalibrationProfile::RANGE_32V_1A),
        Err(ErrorKind::Other)
    );
    assert!(ina.profile().is_none());

    // Still not calibrated, so nothing is sent
    assert_eq!(ina.current_raw(), Err(CurrentReadError::NotCalibrated));

    ina.destroy().done();
}

#[test]
fn failed_configuration_write_keeps_previous_profile() {
    let mut ina = mock_calibrated(&[
        write_reg(RegisterAddress::Calibration, 4_096),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG).with_error(ErrorKind::Other),
        // The current read still uses the 32V/1A profile
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Current, 250),
    ]);

    assert_eq!(
        ina.select_profile(CalibrationProfile::RANGE_32V_2A),
        Err(ErrorKind::Other)
    );
    assert_eq!(ina.profile(), Some(&CalibrationProfile::RANGE_32V_1A));
    assert_eq!(ina.current_ma().unwrap(), 10.0);

    ina.destroy().done();
}

#[test]
fn new_with_profile_returns_device_on_error() {
    let mock = I2cMock::new(&[
        write_reg(RegisterAddress::Calibration, 10_240),
        write_reg(RegisterAddress::Configuration, PROFILE_CONFIG).with_error(ErrorKind::Bus),
    ]);

    let Err(err) = SyncIna219::new_with_profile(
        mock,
        Address::default(),
        CalibrationProfile::RANGE_32V_1A,
    ) else {
        panic!("The configuration write fails");
    };

    assert_eq!(err.reason, ErrorKind::Bus);
    let mut device = err.device;
    device.done();
}

#[test]
fn current_requires_profile() {
    let mut ina = mock_ready(&[]);

    assert_eq!(ina.current_raw(), Err(CurrentReadError::NotCalibrated));
    assert_eq!(ina.current_ma(), Err(CurrentReadError::NotCalibrated));
    assert_eq!(ina.power_raw(), Err(CurrentReadError::NotCalibrated));

    ina.destroy().done();
}

#[test]
fn current_read_reprimes_calibration() {
    let mut ina = mock_calibrated(&[
        // The calibration has to be written right before the current register is read
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Current, 250),
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Current, (-250i16) as u16),
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Current, 0x7FFF),
    ]);

    assert_eq!(ina.current_ma().unwrap(), 10.0);
    assert_eq!(ina.current_ma().unwrap(), -10.0);
    assert_eq!(ina.current_raw().unwrap(), CurrentRegister(i16::MAX));

    ina.destroy().done();
}

#[test]
fn current_bus_errors_propagate() {
    let mut ina = mock_calibrated(&[
        write_reg(RegisterAddress::Calibration, 10_240).with_error(ErrorKind::ArbitrationLoss),
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Current, 0).with_error(ErrorKind::Other),
    ]);

    assert_eq!(
        ina.current_ma(),
        Err(CurrentReadError::I2cError(ErrorKind::ArbitrationLoss))
    );
    assert_eq!(
        ina.current_raw(),
        Err(CurrentReadError::I2cError(ErrorKind::Other))
    );
    // A failed read does not forget the profile
    assert_eq!(ina.profile(), Some(&CalibrationProfile::RANGE_32V_1A));

    ina.destroy().done();
}

#[test]
fn power_is_not_scaled() {
    let mut ina = mock_calibrated(&[
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Power, 636),
        write_reg(RegisterAddress::Calibration, 10_240),
        read_reg(RegisterAddress::Power, 0xFFFF),
    ]);

    assert_eq!(ina.power_raw().unwrap(), PowerRegister(636));
    assert_eq!(ina.power_raw().unwrap(), PowerRegister(-1));

    ina.destroy().done();
}

#[test]
fn bus_voltage_without_profile() {
    let raw_values = [0x0000, 0x0FF8, 0x0FFA, 0x7FFF];
    let transactions: Vec<_> = raw_values
        .iter()
        .map(|&raw| read_reg(RegisterAddress::BusVoltage, raw))
        .collect();
    let mut ina = mock_ready(&transactions);

    for raw in raw_values {
        let expected = f32::from((raw >> 3) * 4) * 0.001;
        assert_eq!(ina.bus_voltage_v().unwrap(), expected);
    }

    ina.destroy().done();
}

#[test]
fn bus_voltage_flags() {
    let mut ina = mock_ready(&[read_reg(RegisterAddress::BusVoltage, (4_000 << 3) | 0b11)]);

    let bv = ina.bus_voltage().unwrap();
    assert_eq!(bv.voltage_mv(), 16_000);
    assert!(bv.is_conversion_ready());
    assert!(bv.has_math_overflowed());

    ina.destroy().done();
}

#[test]
fn shunt_voltage_without_profile() {
    let mut ina = mock_ready(&[
        read_reg(RegisterAddress::ShuntVoltage, 0b0001_1111_0100_0000), // Borrowed from datasheet table
        read_reg(RegisterAddress::ShuntVoltage, 0b1111_0000_0101_1111),
    ]);

    assert_eq!(ina.shunt_voltage_mv().unwrap(), f32::from(8_000_i16) * 0.01);
    assert_eq!(ina.shunt_voltage().unwrap().shunt_voltage_10uv(), -4001);

    ina.destroy().done();
}

#[test]
fn read_raw_uses_register_signedness() {
    let mut ina = mock_ready(&[
        read_reg(RegisterAddress::Current, 0xFFFF),
        read_reg(RegisterAddress::Calibration, 0xFFFF),
        read_reg(RegisterAddress::ShuntVoltage, 0x8000),
        read_reg(RegisterAddress::BusVoltage, 0x8000),
    ]);

    assert_eq!(ina.read_raw(RegisterAddress::Current), Ok(-1));
    assert_eq!(ina.read_raw(RegisterAddress::Calibration), Ok(65_535));
    assert_eq!(ina.read_raw(RegisterAddress::ShuntVoltage), Ok(-32_768));
    assert_eq!(ina.read_raw(RegisterAddress::BusVoltage), Ok(32_768));

    ina.destroy().done();
}

#[test]
fn write_raw_only_to_writable_registers() {
    let mut ina = mock_ready(&[
        write_reg(RegisterAddress::Calibration, 0x2345),
        write_reg(RegisterAddress::Configuration, 0xFFFF),
    ]);

    for reg in [
        RegisterAddress::ShuntVoltage,
        RegisterAddress::BusVoltage,
        RegisterAddress::Power,
        RegisterAddress::Current,
    ] {
        assert_eq!(ina.write_raw(reg, 0), Err(RegisterWriteError::ReadOnly(reg)));
    }

    // Truncated to the register width
    ina.write_raw(RegisterAddress::Calibration, 0x1_2345).unwrap();
    ina.write_raw(RegisterAddress::Configuration, -1).unwrap();
    // Raw writes do not select a profile
    assert!(ina.profile().is_none());

    ina.destroy().done();
}

#[test]
fn configuration_read_back() {
    let triggered = 0x3C1B;
    let mut ina = mock_ready(&[
        read_reg(RegisterAddress::Configuration, PROFILE_CONFIG),
        read_reg(RegisterAddress::Configuration, 0x399F),
        read_reg(RegisterAddress::Configuration, triggered | 0b0111_1000),
    ]);

    assert_eq!(ina.configuration().unwrap(), Configuration::default());
    assert_eq!(ina.configuration().unwrap(), Configuration::default());

    let conf = ina.configuration().unwrap();
    assert_eq!(conf.shunt_resolution, Resolution::Avg128);
    assert!(matches!(conf.operating_mode, OperatingMode::Triggered(_)));

    ina.destroy().done();
}

#[test]
fn other_device_address() {
    let mock = I2cMock::new(&[
        Transaction::write(0x45, vec![0x05, 0x28, 0x00]),
        Transaction::write(0x45, vec![0x00, 0x3C, 0x1F]),
        Transaction::write(0x45, vec![0x05, 0x28, 0x00]),
        Transaction::write_read(0x45, vec![0x04], vec![0x00, 0x19]),
    ]);

    let mut ina = SyncIna219::new(mock, Address::A0_A1);
    ina.select_profile(CalibrationProfile::RANGE_32V_1A).unwrap();
    assert_eq!(ina.current_ma().unwrap(), 1.0);

    ina.destroy().done();
}
