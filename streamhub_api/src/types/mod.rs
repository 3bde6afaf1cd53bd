mod de;

mod list;
pub use self::list::{Category, CategoryId, ListResponse};

mod movie;
pub use self::movie::Movie;

mod series;
pub use self::series::{Episode, EpisodeInfo, Series, SeriesDetail, SeriesInfo};

mod live;
pub use self::live::LiveStream;

mod link;
pub use self::link::LinkResponse;
