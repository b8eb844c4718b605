use polars::df;
use polars::prelude::DataFrame;

use crate::constant::SwingError;
use crate::swing::SwingPoint;

/// 摆动点序列转 dataframe：`datetime`（毫秒时间戳）、`swing_high`、`swing_low`。
pub fn swing_frame(points: &[SwingPoint]) -> Result<DataFrame, SwingError> {
    let frame = df!(
        "datetime" => points.iter().map(|x| x.datetime.timestamp_millis()).collect::<Vec<_>>(),
        "swing_high" => points.iter().map(|x| x.swing_high).collect::<Vec<_>>(),
        "swing_low" => points.iter().map(|x| x.swing_low).collect::<Vec<_>>()
    )?;
    Ok(frame)
}
