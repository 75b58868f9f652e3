use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Open{path: String, source: std::io::Error} = "could not read {path}",
    NotText{path: String, line: usize, source: std::string::FromUtf8Error}
        = "{path} line {line} is not valid UTF-8",
    ShortExport{actual: usize} = "export is {actual} bytes long, shorter than its 65 byte header",
    FieldLength{field: &'static str, expected: usize, actual: usize}
        = "{field} field should be {expected} characters long but is {actual}",
    NotANumber{field: &'static str, value: String} = "{field} field \"{value}\" is not a number",
    BadCoordinate{table: &'static str, line: usize, value: String}
        = "{table} line {line}: \"{value}\" is not a decimal coordinate",
    Config{reason: String} = "invalid merge configuration: {reason}",

    // Non-fatal, collected as warnings
    UnknownTypeCode{code: String, ident: String} = "unknown WPT type {code} on {ident}, ignored",
    MissingFrequency{ident: String} = "navaid {ident} has no frequency, ignored",
    NoRunwayData{icao: String} = "new airport {icao} has no associated runway data",
    UnknownPoint{airway: String, id: String} = "airway {airway} references unknown point id {id}"
}

impl Error {
    /// Whether processing may continue after this error has been reported.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Error::UnknownTypeCode { .. }
                | Error::MissingFrequency { .. }
                | Error::NoRunwayData { .. }
                | Error::UnknownPoint { .. }
        )
    }
}
